//! Public catalog browsing: the grid, the detail page, and the homepage
//! featured selection, rendered as plain text.

use std::sync::Arc;

use clap::Subcommand;
use luxcat_core::{catalog, AppConfig, Product};
use luxcat_remote::RemoteClient;
use luxcat_store::{CategoryStore, ProductStore};
use tokio_util::sync::CancellationToken;

#[derive(Debug, Subcommand)]
pub enum CatalogCommand {
    /// List products with optional filters, one page at a time.
    List {
        /// Substring matched against model and description.
        #[arg(long, default_value = "")]
        query: String,
        /// Category name; omit or pass "Todos" for all categories.
        #[arg(long, default_value = "")]
        category: String,
        /// Only products carrying the "new" badge.
        #[arg(long)]
        new: bool,
        #[arg(long, default_value_t = 1)]
        page: usize,
        /// Overrides the configured products-per-page.
        #[arg(long)]
        page_size: Option<usize>,
    },
    /// Show one product by model (URL-encoded slugs accepted).
    Show { model: String },
    /// The homepage featured selection.
    Featured {
        #[arg(long, default_value_t = 6)]
        count: usize,
    },
}

pub async fn run(
    command: CatalogCommand,
    config: &AppConfig,
    remote: Arc<RemoteClient>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let mut products = ProductStore::new(Arc::clone(&remote), cancel.clone());
    let mut categories = CategoryStore::new(remote, cancel);

    // Independent loads are issued concurrently and joined before rendering.
    let (products_loaded, categories_loaded) = tokio::join!(products.load(), categories.load());
    products_loaded?;
    categories_loaded?;

    match command {
        CatalogCommand::List {
            query,
            category,
            new,
            page,
            page_size,
        } => {
            let page_size = page_size.unwrap_or(config.page_size);
            let filtered = catalog::filter_products(
                products.products(),
                &query,
                &category,
                new,
                categories.categories(),
            );
            let total = catalog::total_pages(filtered.len(), page_size);
            // Out-of-range pages reset to 1, like the grid does when
            // filters change.
            let page = if page == 0 || (total > 0 && page > total) {
                1
            } else {
                page
            };
            let window = catalog::paginate(&filtered, page_size, page);

            println!(
                "{} products, page {page} of {}",
                filtered.len(),
                total.max(1)
            );
            for product in window {
                print_row(product);
            }
        }
        CatalogCommand::Show { model } => {
            let Some(product) = products.find_by_model(&model) else {
                anyhow::bail!("no product with model {model}");
            };
            print_detail(product);

            let related = catalog::related_by_category_id(
                products.products(),
                product.category_id,
                3,
                Some(product.model.as_str()),
            );
            if !related.is_empty() {
                println!("\nRelated:");
                for item in &related {
                    print_row(item);
                }
            }
        }
        CatalogCommand::Featured { count } => {
            for product in catalog::featured_products(products.products(), count) {
                print_row(&product);
            }
        }
    }

    Ok(())
}

fn print_row(product: &Product) {
    let badge = if product.is_new { " [NEW]" } else { "" };
    let category = product.category_name.as_deref().unwrap_or("-");
    println!("{:<20} {:<14} {}{badge}", product.model, category, product.description);
}

fn print_detail(product: &Product) {
    println!("{}", product.model);
    if let Some(category) = product.category_name.as_deref() {
        println!("Category: {category}");
    }
    println!("{}", product.description);
    if let Some(technical) = product.technical_description.as_deref() {
        if !technical.is_empty() {
            println!("\n{technical}");
        }
    }
    if !product.images.is_empty() {
        println!("\nImages:");
        for url in &product.images {
            println!("  {url}");
        }
    }
    if !product.contents.is_empty() {
        println!("\nSpecifications:");
        for url in &product.contents {
            let kind = if catalog::is_pdf_file(url) { "pdf" } else { "image" };
            println!("  [{kind}] {url}");
        }
    }
    if !product.videos.is_empty() {
        println!("\nVideos:");
        for url in &product.videos {
            println!("  {url}");
        }
    }
}
