use anyhow::{bail, Result};
use handoff_common::{Config, ConsoleNotifier, NoopNotifier, Notifier};
use user_directory::{CollectionRef, DirectoryLookup, MongoConnector};

pub async fn users(database: Option<String>, collection: Option<String>, quiet: bool) -> Result<()> {
    if quiet {
        lookup(database, collection, NoopNotifier).await
    } else {
        lookup(database, collection, ConsoleNotifier).await
    }
}

async fn lookup<N: Notifier>(
    database: Option<String>,
    collection: Option<String>,
    notifier: N,
) -> Result<()> {
    let config = Config::from_env()?;
    let mut target = CollectionRef::from_config(&config.directory);
    if let Some(database) = database {
        target.database = database;
    }
    if let Some(collection) = collection {
        target.collection = collection;
    }

    let connector = MongoConnector::from_config(&config.directory)?;
    let mut lookup = DirectoryLookup::new(connector, target, notifier);

    match lookup.run().await.success() {
        Some(docs) => {
            for doc in docs {
                println!("{doc}");
            }
            Ok(())
        }
        None => bail!("could not read the user directory"),
    }
}

pub async fn databases() -> Result<()> {
    let config = Config::from_env()?;
    let connector = MongoConnector::from_config(&config.directory)?;
    for name in user_directory::list_databases(&connector).await? {
        println!("{name}");
    }
    Ok(())
}
