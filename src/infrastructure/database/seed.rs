//! Catalog seeding
//!
//! Slot catalog population is an external, infrequent concern; the service
//! only bootstraps a default catalog (and a handful of sample drivers) when
//! the corresponding table is empty, so a fresh deployment is usable
//! immediately.

use tracing::{info, warn};

use crate::domain::{Driver, DomainResult, RepositoryProvider, Slot};

/// Seed the default 20-slot catalog and sample drivers if the store is empty.
pub async fn seed_if_empty(repos: &dyn RepositoryProvider) -> DomainResult<()> {
    if repos.slots().count().await? == 0 {
        seed_slots(repos).await?;
    }
    if repos.drivers().count().await? == 0 {
        seed_drivers(repos).await?;
    }
    Ok(())
}

async fn seed_slots(repos: &dyn RepositoryProvider) -> DomainResult<()> {
    // Two floors, sections A and B, five slots each.
    let sections = [
        ("Ground Floor - Section A", "1", "A", ["A001", "A002", "A003", "A004", "A005"]),
        ("Ground Floor - Section B", "1", "B", ["B001", "B002", "B003", "B004", "B005"]),
        ("Second Floor - Section A", "2", "A", ["A101", "A102", "A103", "A104", "A105"]),
        ("Second Floor - Section B", "2", "B", ["B101", "B102", "B103", "B104", "B105"]),
    ];

    let mut count = 0;
    for (location, floor, section, slot_ids) in sections {
        for slot_id in slot_ids {
            if let Err(e) = repos
                .slots()
                .save(Slot::new(slot_id, location, floor, section))
                .await
            {
                warn!(slot_id, error = %e, "Failed to seed slot");
            } else {
                count += 1;
            }
        }
    }

    info!(count, "Parking slots seeded");
    Ok(())
}

async fn seed_drivers(repos: &dyn RepositoryProvider) -> DomainResult<()> {
    let drivers = [
        ("DRV001", "John Doe", "john.doe@email.com", "123456789V"),
        ("DRV002", "Jane Smith", "jane.smith@email.com", "987654321V"),
        ("DRV003", "Bob Johnson", "bob.johnson@email.com", "456789123V"),
        ("DRV004", "Alice Brown", "alice.brown@email.com", "789123456V"),
        ("DRV005", "Charlie Wilson", "charlie.wilson@email.com", "321654987V"),
    ];

    let mut count = 0;
    for (driver_id, name, email, nic) in drivers {
        if let Err(e) = repos
            .drivers()
            .save(Driver::new(driver_id, name, email, nic))
            .await
        {
            warn!(driver_id, error = %e, "Failed to seed driver");
        } else {
            count += 1;
        }
    }

    info!(count, "Sample drivers seeded");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::MemoryRepositoryProvider;

    #[tokio::test]
    async fn seeds_catalog_once() {
        let repos = MemoryRepositoryProvider::new();

        seed_if_empty(&repos).await.unwrap();
        assert_eq!(repos.slots().count().await.unwrap(), 20);
        assert_eq!(repos.drivers().count().await.unwrap(), 5);

        // Second call is a no-op.
        seed_if_empty(&repos).await.unwrap();
        assert_eq!(repos.slots().count().await.unwrap(), 20);
    }

    #[tokio::test]
    async fn seeded_slots_start_available() {
        let repos = MemoryRepositoryProvider::new();
        seed_if_empty(&repos).await.unwrap();

        let slot = repos.slots().find_by_id("A001").await.unwrap().unwrap();
        assert!(slot.is_available);
        assert_eq!(slot.floor, "1");
        assert_eq!(slot.section, "A");
    }
}
