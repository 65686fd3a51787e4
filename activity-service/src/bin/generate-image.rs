//! Generate banner illustrations for activities and upload them to the
//! image bucket.

use activity_service::config::GeneratorConfig;
use activity_service::services::generator::{ImageGenerator, UploadOutcome};
use activity_service::services::providers::gemini::{GeminiConfig, GeminiImageProvider};
use activity_service::services::storage::{SupabaseConfig, SupabaseStorage};
use anyhow::Context;
use clap::Parser;
use service_core::config::{process_env, Config as CoreConfig};
use service_core::observability::init_tracing;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Parser)]
#[command(
    name = "generate-image",
    about = "Generate activity banner images and upload them to Supabase Storage"
)]
struct Args {
    /// Activities to illustrate, one image request each.
    #[arg(default_values_t = vec!["Playing basketball".to_string()])]
    activities: Vec<String>,

    /// Directory that receives a local copy of every image.
    #[arg(long, default_value = "images")]
    output_dir: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let common = CoreConfig::load().context("loading configuration")?;
    let otlp_endpoint = process_env("OTLP_ENDPOINT");
    init_tracing("generate-image", &common.log_level, otlp_endpoint.as_deref());

    let config = GeneratorConfig::from_lookup(&process_env).context("loading configuration")?;

    let provider = GeminiImageProvider::new(GeminiConfig {
        api_key: config.gemini.api_key.clone(),
        model: config.models.image_model.clone(),
        api_base: config.gemini.api_base.clone(),
    })
    .context("initializing Gemini image provider")?;

    let storage = SupabaseStorage::new(SupabaseConfig {
        url: config.supabase.url.clone(),
        key: config.supabase.key.clone(),
        bucket: config.supabase.bucket.clone(),
    })
    .context("initializing Supabase storage")?;

    let generator = ImageGenerator::new(Arc::new(provider), Arc::new(storage), &args.output_dir);

    for activity in &args.activities {
        println!("Generating image for: {}", activity);

        let report = match generator.generate(activity).await {
            Ok(report) => report,
            Err(e) => {
                tracing::error!(activity = %activity, error = %e, "Image generation failed");
                eprintln!("✗ {}: {}", activity, e);
                continue;
            }
        };

        for text in &report.texts {
            println!("{}", text);
        }

        for image in &report.images {
            println!("✓ Saved locally: {}", image.local_path.display());
            match &image.upload {
                UploadOutcome::Uploaded => println!("✓ Uploaded: {}", image.object_path),
                UploadOutcome::Failed(reason) => println!("✗ Upload failed: {}", reason),
            }
        }

        if report.images.is_empty() {
            println!("No image returned for: {}", activity);
        }
    }

    println!("Done");
    Ok(())
}
