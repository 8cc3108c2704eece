//! Back-office commands: product and category CRUD plus dashboard stats,
//! all behind the admin login gate.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Subcommand};
use luxcat_core::CatalogStats;
use luxcat_remote::{ProductChanges, RemoteClient};
use luxcat_store::{
    AdminSession, CategoryStore, MediaAttachments, MediaFile, ProductDraft, ProductKey,
    ProductStore, UploadWarning,
};
use tokio_util::sync::CancellationToken;

#[derive(Debug, Args)]
pub struct Credentials {
    #[arg(long, env = "LUXCAT_ADMIN_USER")]
    pub username: String,
    #[arg(long, env = "LUXCAT_ADMIN_PASSWORD", hide_env_values = true)]
    pub password: String,
}

#[derive(Debug, Subcommand)]
pub enum AdminCommand {
    #[command(subcommand)]
    Product(ProductCommand),
    #[command(subcommand)]
    Category(CategoryCommand),
    /// Dashboard statistics over the whole catalog.
    Stats,
}

#[derive(Debug, Subcommand)]
pub enum ProductCommand {
    /// Create a product, uploading any attached files first.
    Add {
        #[arg(long)]
        model: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        technical_description: Option<String>,
        /// Category name; must already exist.
        #[arg(long)]
        category: String,
        /// Image file to upload (repeatable).
        #[arg(long)]
        image: Vec<PathBuf>,
        /// Specification file, PDF or image (repeatable).
        #[arg(long)]
        content: Vec<PathBuf>,
        /// Video file to upload (repeatable).
        #[arg(long)]
        video: Vec<PathBuf>,
        /// Set the "new" badge.
        #[arg(long)]
        new: bool,
    },
    /// Update supplied fields of a product by id.
    Update {
        id: i64,
        #[arg(long)]
        model: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        technical_description: Option<String>,
        /// New category, by name.
        #[arg(long)]
        category: Option<String>,
        /// Set or clear the "new" badge.
        #[arg(long)]
        new: Option<bool>,
    },
    /// Delete a product by id or by model.
    Delete {
        #[arg(long, conflicts_with = "model")]
        id: Option<i64>,
        #[arg(long)]
        model: Option<String>,
    },
    /// Search products by term, optionally within one category id.
    List {
        #[arg(long, default_value = "")]
        query: String,
        #[arg(long)]
        category_id: Option<i64>,
    },
}

#[derive(Debug, Subcommand)]
pub enum CategoryCommand {
    List,
    Add { name: String },
    Rename { id: i64, name: String },
    Delete { id: i64 },
}

pub async fn run(
    credentials: &Credentials,
    command: AdminCommand,
    remote: Arc<RemoteClient>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let session =
        AdminSession::login(&remote, &cancel, &credentials.username, &credentials.password).await?;
    tracing::debug!(username = %session.username(), "back-office session opened");

    match command {
        AdminCommand::Product(command) => run_product(command, remote, cancel).await,
        AdminCommand::Category(command) => run_category(command, remote, cancel).await,
        AdminCommand::Stats => run_stats(remote, cancel).await,
    }
}

async fn run_product(
    command: ProductCommand,
    remote: Arc<RemoteClient>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let mut products = ProductStore::new(Arc::clone(&remote), cancel.clone());
    let mut categories = CategoryStore::new(remote, cancel);

    match command {
        ProductCommand::Add {
            model,
            description,
            technical_description,
            category,
            image,
            content,
            video,
            new,
        } => {
            categories.load().await?;
            let Some(category) = categories.get_by_name(&category) else {
                anyhow::bail!("unknown category \"{category}\" — create it first");
            };

            let draft = ProductDraft {
                model,
                description,
                technical_description,
                category_id: category.id,
                images: vec![],
                contents: vec![],
                videos: vec![],
                is_new: new,
            };
            let attachments = MediaAttachments {
                images: read_files(&image).await?,
                contents: read_files(&content).await?,
                videos: read_files(&video).await?,
            };

            let (created, warnings) = products.create(draft, attachments).await?;
            report_warnings(&warnings);
            println!("created {} (id {})", created.model, created.id.unwrap_or(-1));
        }
        ProductCommand::Update {
            id,
            model,
            description,
            technical_description,
            category,
            new,
        } => {
            let category_id = match category {
                Some(name) => {
                    categories.load().await?;
                    let Some(category) = categories.get_by_name(&name) else {
                        anyhow::bail!("unknown category \"{name}\"");
                    };
                    Some(category.id)
                }
                None => None,
            };

            let changes = ProductChanges {
                model,
                description,
                technical_description,
                category_id,
                images: None,
                contents: None,
                videos: None,
                is_new: new,
            };
            let updated = products.update(id, changes).await?;
            println!("updated {} (id {id})", updated.model);
        }
        ProductCommand::Delete { id, model } => {
            let key = match (id, model) {
                (Some(id), None) => ProductKey::Id(id),
                (None, Some(model)) => ProductKey::Model(model),
                _ => anyhow::bail!("pass exactly one of --id or --model"),
            };
            products.delete(key.clone()).await?;
            println!("deleted {key:?}");
        }
        ProductCommand::List { query, category_id } => {
            products.load().await?;
            for product in products.search(&query, category_id) {
                let badge = if product.is_new { " [NEW]" } else { "" };
                println!(
                    "{:<6} {:<20} {}{badge}",
                    product.id.unwrap_or(-1),
                    product.model,
                    product.description
                );
            }
        }
    }

    Ok(())
}

async fn run_category(
    command: CategoryCommand,
    remote: Arc<RemoteClient>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let mut categories = CategoryStore::new(remote, cancel);
    categories.load().await?;

    match command {
        CategoryCommand::List => {
            for category in categories.categories() {
                println!("{:<6} {}", category.id, category.name);
            }
        }
        CategoryCommand::Add { name } => {
            let category = categories.add_category(&name).await?;
            println!("created category {} (id {})", category.name, category.id);
        }
        CategoryCommand::Rename { id, name } => {
            let category = categories.update_category(id, &name).await?;
            println!("category {id} is now \"{}\"", category.name);
        }
        CategoryCommand::Delete { id } => {
            categories.delete_category(id).await?;
            println!("deleted category {id}");
        }
    }

    Ok(())
}

async fn run_stats(remote: Arc<RemoteClient>, cancel: CancellationToken) -> anyhow::Result<()> {
    let mut products = ProductStore::new(Arc::clone(&remote), cancel.clone());
    let mut categories = CategoryStore::new(remote, cancel);
    let (products_loaded, categories_loaded) = tokio::join!(products.load(), categories.load());
    products_loaded?;
    categories_loaded?;

    let stats = CatalogStats::compute(products.products(), categories.categories());
    println!("products:        {}", stats.total_products);
    println!("new badge:       {}", stats.new_products);
    println!("with videos:     {}", stats.with_videos);
    println!("with images:     {}/{}", stats.with_images, stats.total_products);
    println!(
        "with specs:      {}/{}",
        stats.with_contents, stats.total_products
    );
    println!("\nper category:");
    for share in &stats.per_category {
        println!(
            "  {:<14} {:>4} ({:.1}%)",
            share.name, share.count, share.percentage
        );
    }

    Ok(())
}

async fn read_files(paths: &[PathBuf]) -> anyhow::Result<Vec<MediaFile>> {
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        files.push(MediaFile::from_path(path).await?);
    }
    Ok(files)
}

fn report_warnings(warnings: &[UploadWarning]) {
    for warning in warnings {
        eprintln!(
            "warning: upload of {} failed ({}); product saved without it",
            warning.file_name, warning.message
        );
    }
}
