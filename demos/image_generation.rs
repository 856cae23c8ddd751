use dotenv::dotenv;
use openai_images_rust::{
    models::{model, response_format, size, ImageRequest, ImageResponse},
    ImageClient,
};
use std::error::Error;

fn display_response(response: &ImageResponse) {
    println!("Created: {}", response.created);
    for (i, image) in response.data.iter().enumerate() {
        println!("\nImage {}", i + 1);
        if let Some(url) = &image.url {
            println!("  URL: {}", url);
        }
        if let Some(prompt) = &image.revised_prompt {
            println!("  Revised prompt: {}", prompt);
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let client = ImageClient::from_env()?;

    let request = ImageRequest::builder()
        .prompt("A watercolor lighthouse on a cliff at dusk")
        .model(model::DALL_E_3)
        .size(size::S1024X1024)
        .response_format(response_format::URL)
        .build();

    let response = client.create_image(request).await?;
    display_response(&response);

    Ok(())
}
