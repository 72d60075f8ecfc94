use std::sync::Arc;

use colored::Colorize;

use cadastre_registry::{PropertyRegistry, RegisterProperty, TransferRequest};
use cadastre_server::{RegistryServer, ServerConfig};
use cadastre_store::MemoryStore;
use cadastre_types::{PartyId, PropertyId};

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Serve(args) => cmd_serve(args),
        Command::Demo(_) => cmd_demo(),
    }
}

fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let mut config = match &args.config {
        Some(path) => ServerConfig::load(path)?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    if let Some(backend) = args.backend {
        config.backend = backend.into();
    }

    println!(
        "Cadastre server on {} (backend: {:?})",
        config.bind_addr.to_string().bold(),
        config.backend
    );
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(RegistryServer::new(config).serve())?;
    Ok(())
}

fn cmd_demo() -> anyhow::Result<()> {
    let registry = PropertyRegistry::new(Arc::new(MemoryStore::new()));
    let id = PropertyId::new("PROP001")?;
    let alice = PartyId::new("alice")?;
    let bob = PartyId::new("bob")?;

    let property = registry.register(RegisterProperty {
        property_id: id.clone(),
        registration_number: "123456".into(),
        owner: alice.clone(),
        description: "Casa em condomínio fechado".into(),
        property_address: "Rua das Flores, 123".into(),
        area: 150,
        property_type: "CASA".into(),
    })?;
    println!(
        "{} Registered {} to {}",
        "✓".green().bold(),
        property.property_id.to_string().yellow(),
        property.owner.to_string().cyan()
    );

    registry.add_mortgage(&id, &alice, "Hipoteca Banco XYZ")?;
    println!("{} Mortgage added", "✓".green());

    let transfer = TransferRequest {
        new_owner: bob.clone(),
        reason: "Venda".into(),
        document_hash: "0x1234567890abcdef".into(),
        notary_info: "Cartório Central".into(),
        transfer_value: 1_000_000,
        payment_status: "PAGO".into(),
    };
    match registry.transfer(&id, &alice, transfer.clone()) {
        Err(err) => println!("{} Transfer rejected: {}", "✗".red().bold(), err),
        Ok(_) => anyhow::bail!("transfer of a mortgaged property must be rejected"),
    }

    registry.remove_mortgage(&id, &alice)?;
    println!("{} Mortgage removed", "✓".green());

    let record = registry.transfer(&id, &alice, transfer)?;
    println!(
        "{} Transferred {} → {} (record {})",
        "✓".green().bold(),
        record.from.to_string().cyan(),
        record.to.to_string().cyan(),
        record.record_id.to_string().dimmed()
    );

    let history = registry.transfer_history(&id)?;
    println!("History: {} record(s)", history.len().to_string().bold());
    for r in &history {
        println!(
            "  {} {} → {} ({})",
            r.timestamp.format("%Y-%m-%d %H:%M:%S").to_string().dimmed(),
            r.from,
            r.to,
            r.reason
        );
    }
    Ok(())
}
