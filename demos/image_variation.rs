use dotenv::dotenv;
use openai_images_rust::{
    form::NamedFile,
    models::{model, response_format, size, ImageVariRequest},
    ImageClient,
};
use std::error::Error;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let Some(image) = std::env::args().nth(1) else {
        eprintln!("usage: image_variation <image.png>");
        std::process::exit(2);
    };

    let client = ImageClient::from_env()?;

    let request = ImageVariRequest::builder()
        .image(NamedFile::open(&image)?)
        .model(model::DALL_E_2)
        .n(2)
        .size(size::S256X256)
        .response_format(response_format::URL)
        .build();

    let response = client.create_variation_image(request).await?;
    for image in &response.data {
        if let Some(url) = &image.url {
            println!("{}", url);
        }
    }

    Ok(())
}
