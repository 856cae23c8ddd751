use dotenv::dotenv;
use openai_images_rust::{
    form::FileHeader,
    models::{model, response_format, size, ImageEditRequest},
    ImageClient,
};
use std::error::Error;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let (Some(image), Some(mask)) = (args.next(), args.next()) else {
        eprintln!("usage: image_edit <image.png> <mask.png>");
        std::process::exit(2);
    };

    let client = ImageClient::from_env()?;

    let request = ImageEditRequest::builder()
        .image(vec![FileHeader::from_path(&image)?])
        .mask(FileHeader::from_path(&mask)?)
        .prompt("A sunlit indoor lounge area with a pool containing a flamingo")
        .model(model::DALL_E_2)
        .size(size::S512X512)
        .response_format(response_format::B64_JSON)
        .build();

    let response = client.create_edit_image(request).await?;
    for (i, item) in response.data.iter().enumerate() {
        if let Some(decoded) = item.decode_b64_json() {
            let path = format!("edit_{}.png", i + 1);
            std::fs::write(&path, decoded?)?;
            println!("Saved {}", path);
        }
    }

    Ok(())
}
