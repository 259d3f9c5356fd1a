use std::fmt::Write as _;

use anyhow::Context;
use colored::Colorize;

use chordata_inspect::SnapshotAssembler;
use chordata_server::{InspectorConfig, InspectorServer};
use chordata_store::{InMemoryStore, StoreFixture, StoreGateway};
use chordata_types::{EntityDescriptor, ModelDocument, Snapshot, NIL};

use crate::cli::*;

const DEMO_FIXTURE: &str = include_str!("../fixtures/demo.json");

pub async fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Serve(args) => cmd_serve(args).await,
        Command::Snapshot(args) => cmd_snapshot(args, cli.format).await,
        Command::Schema(args) => cmd_schema(args, cli.format).await,
    }
}

fn load_store(args: &StoreArgs) -> anyhow::Result<InMemoryStore> {
    let fixture = match &args.fixture {
        Some(path) => StoreFixture::load(path)
            .with_context(|| format!("loading fixture {}", path.display()))?,
        None => StoreFixture::from_json(DEMO_FIXTURE)?,
    };
    let store = fixture.build()?;
    tracing::debug!(
        entities = store.entity_count(),
        records = store.total_records(),
        "store loaded"
    );
    Ok(store)
}

fn serve_config(args: &ServeArgs) -> anyhow::Result<InspectorConfig> {
    let mut config = match &args.config {
        Some(path) => InspectorConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => InspectorConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    if let Some(cap) = args.cap {
        config.sample_cap = cap;
    }
    if let Some(minutes) = args.utc_offset {
        config.utc_offset_minutes = minutes;
    }
    config.validate()?;
    Ok(config)
}

async fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let config = serve_config(&args)?;
    let gateway = StoreGateway::spawn(load_store(&args.store)?)?;
    println!(
        "{} Chordata inspector on {}",
        "✓".green().bold(),
        format!("http://{}", config.bind_addr).bold()
    );
    println!("  Sample cap: {}", config.sample_cap.to_string().cyan());
    println!("  Press {} to stop.", "Ctrl-C".yellow());
    InspectorServer::new(config, gateway)?
        .serve_with_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;
    Ok(())
}

async fn cmd_snapshot(args: SnapshotArgs, format: OutputFormat) -> anyhow::Result<()> {
    let gateway = StoreGateway::spawn(load_store(&args.store)?)?;
    let snapshot = SnapshotAssembler::new(gateway)
        .with_cap(args.cap)
        .assemble()
        .await?;
    match format {
        OutputFormat::Json => println!("{}", snapshot.to_json_pretty()?),
        OutputFormat::Text => print!("{}", render_snapshot(&snapshot)),
    }
    Ok(())
}

async fn cmd_schema(args: SchemaArgs, format: OutputFormat) -> anyhow::Result<()> {
    let gateway = StoreGateway::spawn(load_store(&args.store)?)?;
    let entities = SnapshotAssembler::new(gateway).describe().await?;
    match format {
        OutputFormat::Json => println!("{}", schema_json(&entities)?),
        OutputFormat::Text => {
            for entity in &entities {
                print!("{}", render_schema(entity));
            }
        }
    }
    Ok(())
}

/// Schema as the same camelCase documents `/api/models` serves, without instances.
fn schema_json(entities: &[EntityDescriptor]) -> serde_json::Result<String> {
    let documents: Vec<ModelDocument> = entities.iter().map(ModelDocument::from).collect();
    serde_json::to_string_pretty(&documents)
}

fn render_schema(entity: &EntityDescriptor) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} ({} records)",
        entity.name.yellow().bold(),
        entity.live_count
    );
    for attribute in &entity.attributes {
        let optional = if attribute.optional { "?" } else { "" };
        let _ = writeln!(
            out,
            "  {}{}: {}",
            attribute.name,
            optional,
            attribute.attribute_type.to_string().cyan()
        );
    }
    for relationship in &entity.relationships {
        let arity = if relationship.to_many { "to-many" } else { "to-one" };
        let destination = if relationship.is_unresolved() {
            relationship.destination_entity.red()
        } else {
            relationship.destination_entity.blue()
        };
        let _ = writeln!(
            out,
            "  {} → {} ({})",
            relationship.name,
            destination,
            arity.dimmed()
        );
    }
    out
}

fn render_snapshot(snapshot: &Snapshot) -> String {
    if snapshot.is_empty() {
        return "No entities.\n".to_string();
    }
    let mut out = String::new();
    for entity in snapshot.entities() {
        out.push_str(&render_schema(&entity.descriptor));
        if entity.sample.is_empty() {
            out.push('\n');
            continue;
        }
        let _ = writeln!(
            out,
            "  {}",
            format!(
                "showing first {} of {}",
                entity.sample.len(),
                entity.descriptor.live_count
            )
            .dimmed()
        );
        for instance in &entity.sample {
            let fields: Vec<String> = entity
                .descriptor
                .attributes
                .iter()
                .map(|a| format!("{}={}", a.name, instance.field(&a.name).unwrap_or(NIL)))
                .collect();
            let _ = writeln!(
                out,
                "    {} {}",
                instance.identity.short().dimmed(),
                fields.join(", ")
            );
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demo_gateway() -> StoreGateway {
        StoreGateway::spawn(load_store(&StoreArgs::default()).unwrap()).unwrap()
    }

    #[test]
    fn demo_fixture_loads() {
        let store = load_store(&StoreArgs::default()).unwrap();
        assert_eq!(store.entity_count(), 5);
        assert_eq!(store.total_records(), 12);
    }

    #[test]
    fn missing_fixture_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let args = StoreArgs {
            fixture: Some(dir.path().join("absent.json")),
        };
        let err = load_store(&args).unwrap_err();
        assert!(err.to_string().contains("loading fixture"));
    }

    #[test]
    fn serve_flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chordata.toml");
        std::fs::write(&path, "sample_cap = 10\nutc_offset_minutes = 60\n").unwrap();
        let args = ServeArgs {
            store: StoreArgs::default(),
            config: Some(path),
            bind: Some("127.0.0.1:9999".parse().unwrap()),
            cap: Some(5),
            utc_offset: None,
        };
        let config = serve_config(&args).unwrap();
        assert_eq!(config.sample_cap, 5);
        assert_eq!(config.utc_offset_minutes, 60);
        assert_eq!(config.bind_addr.port(), 9999);
    }

    #[test]
    fn invalid_serve_override_rejected() {
        let args = ServeArgs {
            store: StoreArgs::default(),
            config: None,
            bind: None,
            cap: Some(0),
            utc_offset: None,
        };
        assert!(serve_config(&args).is_err());
    }

    #[tokio::test]
    async fn demo_snapshot_is_sorted_and_formatted() {
        let snapshot = SnapshotAssembler::new(demo_gateway()).assemble().await.unwrap();
        assert_eq!(
            snapshot.names(),
            vec!["Category", "Customer", "Order", "Product", "Supplier"]
        );

        let product = snapshot.entity("Product").unwrap();
        assert_eq!(product.descriptor.live_count, 3);
        let chai = &product.sample[0];
        assert_eq!(chai.field("productName"), Some("Chai"));
        assert_eq!(chai.field("unitPrice"), Some("18.00"));
        assert_eq!(chai.field("discontinued"), Some("false"));
        assert_eq!(
            product.descriptor.relationship("orderDetails").unwrap().destination_entity,
            "Unknown"
        );

        let order = snapshot.entity("Order").unwrap();
        assert_eq!(order.sample[0].field("orderDate"), Some("Jul 4, 1996 at 12:00 AM"));
        assert_eq!(order.sample[1].field("shippedDate"), Some(NIL));

        let category = snapshot.entity("Category").unwrap();
        assert_eq!(category.sample[0].field("picture"), Some("4 bytes"));
        assert_eq!(category.sample[1].field("picture"), Some(NIL));
    }

    #[tokio::test]
    async fn text_rendering_lists_entities_and_samples() {
        let snapshot = SnapshotAssembler::new(demo_gateway())
            .with_cap(1)
            .assemble()
            .await
            .unwrap();
        let text = render_snapshot(&snapshot);
        assert!(text.contains("Product"));
        assert!(text.contains("productName=Chai"));
        assert!(!text.contains("productName=Chang"));
        assert!(text.contains("showing first 1 of 3"));
    }

    #[tokio::test]
    async fn schema_json_matches_models_shape() {
        let entities = SnapshotAssembler::new(demo_gateway()).describe().await.unwrap();
        let json: serde_json::Value = serde_json::from_str(&schema_json(&entities).unwrap()).unwrap();

        let product = &json[3];
        assert_eq!(product["name"], "Product");
        assert_eq!(product["entityCount"], 3);
        assert_eq!(product["attributeCount"], 6);
        assert_eq!(product["attributes"][3]["type"], "Decimal");
        assert_eq!(product["relationships"][2]["destinationEntity"], "Unknown");
        assert_eq!(product["relationships"][2]["toMany"], true);
        assert_eq!(product["instances"], serde_json::json!([]));
        assert!(product.get("live_count").is_none());
    }

    #[test]
    fn empty_snapshot_renders_placeholder() {
        assert_eq!(render_snapshot(&Snapshot::default()), "No entities.\n");
    }
}
