use std::path::PathBuf;

use listino_io::store::PartnerStore;

use crate::PartnerCommands;

fn open_store(dir: Option<PathBuf>) -> PartnerStore {
    match dir {
        Some(dir) => PartnerStore::new(dir),
        None => PartnerStore::default_location(),
    }
}

pub fn run(command: PartnerCommands, store_dir: Option<PathBuf>) -> Result<(), String> {
    let store = open_store(store_dir);
    match command {
        PartnerCommands::Save { region, file } => {
            let bytes = std::fs::read(&file)
                .map_err(|e| format!("cannot read {}: {e}", file.display()))?;
            // Reject files the matrix parser cannot read, before storing them.
            listino_io::cache::parse_bytes(&bytes)?;
            let path = store.save(&region, &bytes)?;
            println!("saved {} -> {}", region.trim(), path.display());
            Ok(())
        }
        PartnerCommands::List => {
            let regions = store.list();
            if regions.is_empty() {
                println!("no partner lists stored in {}", store.dir().display());
            }
            for region in regions {
                println!("{region}");
            }
            Ok(())
        }
        PartnerCommands::Delete { region } => {
            store.delete(&region)?;
            println!("deleted {}", region.trim());
            Ok(())
        }
    }
}
