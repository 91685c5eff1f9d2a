use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use petclinic_core::{ClientConfig, ClinicClient};
use petclinic_types::{Owner, Pet, PetType, Specialty, Vet, Visit};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "petclinic")]
#[command(about = "Petclinic REST API client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage owners
    Owners {
        #[command(subcommand)]
        action: OwnerAction,
    },
    /// Manage pets
    Pets {
        #[command(subcommand)]
        action: PetAction,
    },
    /// Manage pet types
    PetTypes {
        #[command(subcommand)]
        action: CrudAction,
    },
    /// Manage vet specialties
    Specialties {
        #[command(subcommand)]
        action: CrudAction,
    },
    /// Manage vets
    Vets {
        #[command(subcommand)]
        action: CrudAction,
    },
    /// Manage visits
    Visits {
        #[command(subcommand)]
        action: VisitAction,
    },
}

#[derive(Args)]
struct JsonBody {
    /// Entity as a JSON object (camelCase field names)
    #[arg(long)]
    json: String,
}

#[derive(Subcommand)]
enum CrudAction {
    /// List all
    List,
    /// Fetch one by id
    Get { id: i32 },
    /// Create from JSON
    Add {
        #[command(flatten)]
        body: JsonBody,
    },
    /// Replace by id from JSON
    Update {
        id: i32,
        #[command(flatten)]
        body: JsonBody,
    },
    /// Delete by id
    Delete { id: i32 },
}

#[derive(Subcommand)]
enum OwnerAction {
    #[command(flatten)]
    Crud(CrudAction),
    /// Find owners whose last name starts with the given text
    Search {
        #[arg(long)]
        last_name: Option<String>,
    },
}

#[derive(Subcommand)]
enum PetAction {
    /// List all
    List,
    /// Fetch one by id
    Get { id: i32 },
    /// Add a pet to an owner
    Add {
        owner_id: i32,
        #[command(flatten)]
        body: JsonBody,
    },
    /// Replace by id from JSON
    Update {
        id: i32,
        #[command(flatten)]
        body: JsonBody,
    },
    /// Delete by id
    Delete { id: i32 },
}

#[derive(Subcommand)]
enum VisitAction {
    /// List all
    List,
    /// Fetch one by id
    Get { id: i32 },
    /// Record a visit for an owner's pet
    Add {
        owner_id: i32,
        pet_id: i32,
        #[command(flatten)]
        body: JsonBody,
    },
    /// Replace by id from JSON
    Update {
        id: i32,
        #[command(flatten)]
        body: JsonBody,
    },
    /// Delete by id
    Delete { id: i32 },
}

fn parse<T: DeserializeOwned>(body: &JsonBody) -> anyhow::Result<T> {
    serde_json::from_str(&body.json).context("invalid --json value")
}

fn print<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run_owners(client: &ClinicClient, action: OwnerAction) -> anyhow::Result<()> {
    let owners = &client.owners;
    match action {
        OwnerAction::Crud(CrudAction::List) => print(&owners.get_owners().await?),
        OwnerAction::Crud(CrudAction::Get { id }) => print(&owners.get_owner_by_id(id).await?),
        OwnerAction::Crud(CrudAction::Add { body }) => {
            print(&owners.add_owner(&parse::<Owner>(&body)?).await?)
        }
        OwnerAction::Crud(CrudAction::Update { id, body }) => {
            owners.update_owner(id, &parse::<Owner>(&body)?).await?;
            println!("Updated owner {id}");
            Ok(())
        }
        OwnerAction::Crud(CrudAction::Delete { id }) => {
            owners.delete_owner(id).await?;
            println!("Deleted owner {id}");
            Ok(())
        }
        OwnerAction::Search { last_name } => {
            print(&owners.search_owners(last_name.as_deref()).await?)
        }
    }
}

async fn run_pets(client: &ClinicClient, action: PetAction) -> anyhow::Result<()> {
    let pets = &client.pets;
    match action {
        PetAction::List => print(&pets.get_pets().await?),
        PetAction::Get { id } => print(&pets.get_pet_by_id(id).await?),
        PetAction::Add { owner_id, body } => {
            print(&pets.add_pet(owner_id, &parse::<Pet>(&body)?).await?)
        }
        PetAction::Update { id, body } => {
            pets.update_pet(id, &parse::<Pet>(&body)?).await?;
            println!("Updated pet {id}");
            Ok(())
        }
        PetAction::Delete { id } => {
            pets.delete_pet(id).await?;
            println!("Deleted pet {id}");
            Ok(())
        }
    }
}

async fn run_visits(client: &ClinicClient, action: VisitAction) -> anyhow::Result<()> {
    let visits = &client.visits;
    match action {
        VisitAction::List => print(&visits.get_visits().await?),
        VisitAction::Get { id } => print(&visits.get_visit_by_id(id).await?),
        VisitAction::Add {
            owner_id,
            pet_id,
            body,
        } => print(
            &visits
                .add_visit(owner_id, pet_id, &parse::<Visit>(&body)?)
                .await?,
        ),
        VisitAction::Update { id, body } => {
            visits.update_visit(id, &parse::<Visit>(&body)?).await?;
            println!("Updated visit {id}");
            Ok(())
        }
        VisitAction::Delete { id } => {
            visits.delete_visit(id).await?;
            println!("Deleted visit {id}");
            Ok(())
        }
    }
}

async fn run_pet_types(client: &ClinicClient, action: CrudAction) -> anyhow::Result<()> {
    let pet_types = &client.pet_types;
    match action {
        CrudAction::List => print(&pet_types.get_pet_types().await?),
        CrudAction::Get { id } => print(&pet_types.get_pet_type_by_id(id).await?),
        CrudAction::Add { body } => {
            print(&pet_types.add_pet_type(&parse::<PetType>(&body)?).await?)
        }
        CrudAction::Update { id, body } => {
            pet_types
                .update_pet_type(id, &parse::<PetType>(&body)?)
                .await?;
            println!("Updated pet type {id}");
            Ok(())
        }
        CrudAction::Delete { id } => {
            pet_types.delete_pet_type(id).await?;
            println!("Deleted pet type {id}");
            Ok(())
        }
    }
}

async fn run_specialties(client: &ClinicClient, action: CrudAction) -> anyhow::Result<()> {
    let specialties = &client.specialties;
    match action {
        CrudAction::List => print(&specialties.get_specialties().await?),
        CrudAction::Get { id } => print(&specialties.get_specialty_by_id(id).await?),
        CrudAction::Add { body } => print(
            &specialties
                .add_specialty(&parse::<Specialty>(&body)?)
                .await?,
        ),
        CrudAction::Update { id, body } => {
            specialties
                .update_specialty(id, &parse::<Specialty>(&body)?)
                .await?;
            println!("Updated specialty {id}");
            Ok(())
        }
        CrudAction::Delete { id } => {
            specialties.delete_specialty(id).await?;
            println!("Deleted specialty {id}");
            Ok(())
        }
    }
}

async fn run_vets(client: &ClinicClient, action: CrudAction) -> anyhow::Result<()> {
    let vets = &client.vets;
    match action {
        CrudAction::List => print(&vets.get_vets().await?),
        CrudAction::Get { id } => print(&vets.get_vet_by_id(id).await?),
        CrudAction::Add { body } => print(&vets.add_vet(&parse::<Vet>(&body)?).await?),
        CrudAction::Update { id, body } => {
            vets.update_vet(id, &parse::<Vet>(&body)?).await?;
            println!("Updated vet {id}");
            Ok(())
        }
        CrudAction::Delete { id } => {
            vets.delete_vet(id).await?;
            println!("Deleted vet {id}");
            Ok(())
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let cfg = ClientConfig::from_env_values(
        std::env::var("REST_API_URL").ok(),
        std::env::var("REST_API_TIMEOUT_SECS").ok(),
    )?;
    tracing::debug!("using REST API at {}", cfg.api_base_url());
    let client = ClinicClient::new(&cfg)?;

    match cli.command {
        Commands::Owners { action } => run_owners(&client, action).await,
        Commands::Pets { action } => run_pets(&client, action).await,
        Commands::PetTypes { action } => run_pet_types(&client, action).await,
        Commands::Specialties { action } => run_specialties(&client, action).await,
        Commands::Vets { action } => run_vets(&client, action).await,
        Commands::Visits { action } => run_visits(&client, action).await,
    }
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let filter = tracing_subscriber::EnvFilter::from_default_env();
    let filter = match "petclinic=warn".parse() {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run(Cli::parse()).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
