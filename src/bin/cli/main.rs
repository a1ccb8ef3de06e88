use anyhow::{anyhow, Context, Result};
use base64::Engine;
use clap::{Parser, Subcommand};
use prompt_gallery::client::{prompts, ApiClient, CreateForm, GalleryPost};
use std::{
    path::{Path, PathBuf},
    time::Duration,
};

/// How long a clean publish lingers on the success message before the
/// gallery is shown
const GALLERY_NAVIGATE_DELAY: Duration = Duration::from_secs(3);

#[derive(Parser, Debug)]
#[command(name = "gallery-cli")]
#[command(about = "CLI client for the AI image community gallery", long_about = None)]
struct Cli {
    /// Server URL
    #[arg(short, long, env = "GALLERY_URL", default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate an image from a prompt
    Generate {
        /// The generation prompt
        prompt: String,
        /// Write the generated image to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Display name to publish under
        #[arg(long)]
        name: Option<String>,
        /// Publish the generated image to the gallery
        #[arg(long)]
        share: bool,
    },

    /// Publish an existing image to the gallery
    Publish {
        /// Display name to publish under
        #[arg(long)]
        name: String,
        /// The prompt the image was generated from
        #[arg(long)]
        prompt: String,
        /// Image file to publish
        #[arg(long)]
        photo: PathBuf,
    },

    /// List the community gallery
    Gallery,

    /// Print a random example prompt
    Surprise {
        /// Current prompt, never repeated by the pick
        #[arg(long, default_value = "")]
        current: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let api = ApiClient::new(cli.url);

    match cli.command {
        Commands::Generate {
            prompt,
            output,
            name,
            share,
        } => run_generate(&api, prompt, output, name, share).await,
        Commands::Publish {
            name,
            prompt,
            photo,
        } => run_publish(&api, name, prompt, photo).await,
        Commands::Gallery => run_gallery(&api).await,
        Commands::Surprise { current } => {
            println!("{}", prompts::random_prompt(&current));
            Ok(())
        }
    }
}

async fn run_generate(
    api: &ApiClient,
    prompt: String,
    output: Option<PathBuf>,
    name: Option<String>,
    share: bool,
) -> Result<()> {
    let mut form = CreateForm::new();
    form.set_prompt(prompt);
    if let Some(name) = name {
        form.set_name(name);
    }

    if !form.begin_generate() {
        return Err(form_error(&form));
    }
    println!("Generating...");

    let result = api.generate(form.prompt()).await;
    form.complete_generate(result);

    if form.error().is_some() {
        return Err(form_error(&form));
    }

    let photo = form
        .photo()
        .ok_or_else(|| anyhow!("no image returned"))?
        .to_string();
    println!("Image generated for \"{}\"", form.prompt());

    if let Some(path) = &output {
        write_image(path, &photo)?;
        println!("Saved to {}", path.display());
    }

    if !share {
        return Ok(());
    }

    if !form.begin_publish() {
        return Err(form_error(&form));
    }
    println!("Sharing with the community...");

    let result = api.publish(form.name(), form.prompt(), &photo).await;
    form.complete_publish(result);

    if form.error().is_some() {
        return Err(form_error(&form));
    }

    if let Some(warning) = form.publish_warning() {
        println!("Shared, with a note: {}", warning);
    } else if form.should_navigate_to_gallery() {
        println!("Shared with the community!");
        tokio::time::sleep(GALLERY_NAVIGATE_DELAY).await;
        run_gallery(api).await?;
    }

    Ok(())
}

async fn run_publish(api: &ApiClient, name: String, prompt: String, photo: PathBuf) -> Result<()> {
    let data_url = read_image(&photo)?;

    let outcome = api
        .publish(&name, &prompt, &data_url)
        .await
        .map_err(|e| anyhow!("{}", e.user_message()))?;

    match &outcome.warning {
        Some(warning) => println!("Shared, with a note: {}", warning),
        None => println!("Shared with the community: {}", outcome.photo),
    }

    Ok(())
}

async fn run_gallery(api: &ApiClient) -> Result<()> {
    let posts = api
        .gallery()
        .await
        .map_err(|e| anyhow!("{}", e.user_message()))?;

    if posts.is_empty() {
        println!("The gallery is empty, publish something!");
        return Ok(());
    }

    for GalleryPost {
        name,
        prompt,
        photo,
    } in &posts
    {
        let location = if photo.starts_with("data:") {
            "[inline image]"
        } else {
            photo.as_str()
        };
        println!("{} — \"{}\" — {}", name, prompt, location);
    }

    Ok(())
}

fn form_error(form: &CreateForm) -> anyhow::Error {
    anyhow!("{}", form.error().unwrap_or("something went wrong"))
}

/// Decode a data URL and write the image bytes to disk
fn write_image(path: &Path, data_url: &str) -> Result<()> {
    let encoded = data_url
        .split_once(',')
        .map(|(_, rest)| rest)
        .context("unexpected image payload")?;

    let bytes = base64::engine::general_purpose::STANDARD
        .decode(encoded)
        .context("image payload is not valid base64")?;

    std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

/// Read an image file and encode it as an inline data URL
fn read_image(path: &Path) -> Result<String> {
    let bytes =
        std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;

    let mime = match path.extension().and_then(|e| e.to_str()) {
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        _ => "image/jpeg",
    };

    Ok(format!(
        "data:{};base64,{}",
        mime,
        base64::engine::general_purpose::STANDARD.encode(&bytes)
    ))
}
