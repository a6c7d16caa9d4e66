//! Prints the composed menu tree for an action registry.
//!
//! With no arguments a small in-memory registry is seeded, which makes the
//! tool usable offline. Pass a JSON config file path to target a live
//! endpoint instead:
//!
//!     menu-tree path/to/registry.json

use std::sync::Arc;

use actionkit::{
    ActionRecord, HttpTransport, InMemoryRegistry, MenuBuilder, RegistryClient, RegistryConfig,
    RegistryTransport,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config_path = std::env::args().nth(1);
    let config = match &config_path {
        Some(path) => RegistryConfig::from_file(std::path::Path::new(path))?,
        None => RegistryConfig::default(),
    };

    let transport: Arc<dyn RegistryTransport> = match &config_path {
        Some(_) => Arc::new(HttpTransport::new(&config)?),
        None => Arc::new(demo_registry()?),
    };

    let registry = Arc::new(RegistryClient::new(transport, &config));
    let builder = MenuBuilder::new(registry.clone());
    let tree = builder.refresh().await;

    if tree.is_empty() {
        println!("(empty menu)");
        return Ok(());
    }
    for node in &tree.nodes {
        println!(
            "{}{}",
            node.display_name,
            if node.has_submenu { " (+)" } else { "" }
        );
        if let Some(pattern) = &node.submenu_pattern {
            for child in registry.get_many(pattern).await? {
                println!("  - {}", child.path);
            }
        }
    }
    Ok(())
}

fn demo_registry() -> actionkit::ActionResult<InMemoryRegistry> {
    let registry = InMemoryRegistry::new();
    for record in [
        ActionRecord::new("menu.news").with_label("News"),
        ActionRecord::new("menu.news.world").with_script("lib/news/world.js"),
        ActionRecord::new("menu.news.local").with_script("lib/news/local.js"),
        ActionRecord::new("menu.sport").with_label("Sport"),
        ActionRecord::new("menu.archive"),
    ] {
        registry.add(record)?;
    }
    Ok(registry)
}
