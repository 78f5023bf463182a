use clap::Subcommand;
use stayfocused_core::Config;

#[derive(Subcommand)]
pub enum GalleryAction {
    /// List the configured images with their position labels
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: GalleryAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        GalleryAction::List { json } => {
            let mut gallery = Config::load()?.gallery();
            if gallery.is_empty() {
                if json {
                    println!("[]");
                } else {
                    println!("No images configured");
                }
                return Ok(());
            }

            let mut entries = Vec::with_capacity(gallery.len());
            for _ in 0..gallery.len() {
                if let (Some(label), Some(image)) = (gallery.counter_label(), gallery.current()) {
                    entries.push(serde_json::json!({ "position": label, "image": image }));
                }
                gallery.next();
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                for entry in &entries {
                    println!("{:>7}  {}", entry["position"].as_str().unwrap_or_default(), entry["image"].as_str().unwrap_or_default());
                }
            }
        }
    }
    Ok(())
}
