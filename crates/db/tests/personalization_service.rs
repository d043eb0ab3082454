use std::sync::Arc;

use geolens_core::catalog::{CostCategory, Region};
use geolens_core::interactions::{Interaction, InteractionAction};
use geolens_core::persistence::{PersistedState, PERSISTED_INTERACTIONS};
use geolens_core::preferences::PreferenceUpdate;
use geolens_core::recommendations::POPULAR_COUNTRIES;
use geolens_db::repositories::{InMemoryKeyValueRepository, KeyValueRepository};
use geolens_db::{connect_with_settings, migrations, PersonalizationService, PersonalizationStore};

type ServiceTestResult<T = ()> = Result<T, String>;

const KEY: &str = "geolens.personalization";

macro_rules! require {
    ($cond:expr) => {
        if !$cond {
            return Err(format!("assertion failed: `{}`", stringify!($cond)));
        }
    };
    ($cond:expr, $($arg:tt)*) => {
        if !$cond {
            return Err(format!($($arg)*));
        }
    };
}

macro_rules! require_eq {
    ($left:expr, $right:expr) => {
        if $left != $right {
            return Err(format!(
                "assertion failed: `left == right` (`{:?}` != `{:?}`)",
                $left,
                $right
            ));
        }
    };
    ($left:expr, $right:expr, $($arg:tt)*) => {
        if $left != $right {
            return Err(format!($($arg)*));
        }
    };
}

fn memory_store() -> (Arc<InMemoryKeyValueRepository>, PersonalizationStore) {
    let repository = Arc::new(InMemoryKeyValueRepository::default());
    let store = PersonalizationStore::new(repository.clone(), KEY);
    (repository, store)
}

async fn stored_state(store: &PersonalizationStore) -> ServiceTestResult<PersistedState> {
    store
        .try_load()
        .await
        .map_err(|err| err.to_string())?
        .ok_or_else(|| "state should be persisted".to_string())
}

#[tokio::test]
async fn cold_start_serves_popular_destinations() -> ServiceTestResult {
    let service = PersonalizationService::in_memory().await;

    let recommendations = service.recommendations(&[], None).await;
    let names: Vec<&str> = recommendations.iter().map(|r| r.country.as_str()).collect();

    require_eq!(names, POPULAR_COUNTRIES.to_vec());
    require!(service.preferences().await.is_none(), "no profile before any interaction");
    Ok(())
}

#[tokio::test]
async fn tracking_persists_after_every_interaction() -> ServiceTestResult {
    let (repository, store) = memory_store();
    let service = PersonalizationService::restore(store.clone(), 5).await;

    let recorded = service.track_interaction(Interaction::hover("usa")).await;
    require_eq!(recorded.country_name, "United States");
    require_eq!(recorded.action, InteractionAction::Hover);

    let stored = stored_state(&store).await?;
    require_eq!(stored.interactions.len(), 1);
    require!(stored.preferences.is_none(), "profile needs five interactions");

    for _ in 0..4 {
        service.track_interaction(Interaction::click("Japan")).await;
    }
    let stored = stored_state(&store).await?;
    require!(stored.preferences.is_some(), "profile should be persisted once inferred");

    let raw = repository.get(KEY).await.map_err(|err| err.to_string())?;
    require!(raw.is_some_and(|raw| raw.contains("\"country_name\":\"Japan\"")));
    Ok(())
}

#[tokio::test]
async fn restart_restores_log_and_profile() -> ServiceTestResult {
    let (_, store) = memory_store();
    let first = PersonalizationService::restore(store.clone(), 5).await;
    for name in ["Japan", "South Korea", "China", "Japan", "Japan", "Thailand"] {
        first.track_interaction(Interaction::pin(name)).await;
    }
    let expected_profile = first.preferences().await;

    let second = PersonalizationService::restore(store, 5).await;
    require_eq!(second.stats().await.total_interactions, 6);
    require_eq!(second.preferences().await, expected_profile);
    require_eq!(
        second.preferences().await.and_then(|p| p.favorite_regions.first().copied()),
        Some(Region::EastAsia)
    );
    Ok(())
}

#[tokio::test]
async fn only_last_hundred_interactions_survive_restart() -> ServiceTestResult {
    let (_, store) = memory_store();
    let first = PersonalizationService::restore(store.clone(), 5).await;
    for _ in 0..120 {
        first.track_interaction(Interaction::hover("Egypt")).await;
    }
    require_eq!(first.stats().await.total_interactions, 120);

    let second = PersonalizationService::restore(store, 5).await;
    require_eq!(second.stats().await.total_interactions, PERSISTED_INTERACTIONS);
    Ok(())
}

#[tokio::test]
async fn malformed_stored_state_starts_empty() -> ServiceTestResult {
    let (repository, store) = memory_store();
    repository.put(KEY, "not json at all").await.map_err(|err| err.to_string())?;

    let service = PersonalizationService::restore(store, 5).await;
    require_eq!(service.stats().await.total_interactions, 0);
    require!(service.preferences().await.is_none());
    Ok(())
}

#[tokio::test]
async fn out_of_range_stored_profile_is_discarded() -> ServiceTestResult {
    let (repository, store) = memory_store();
    let raw = r#"{
        "interactions": [
            {"country_name": "Japan", "action": "click", "timestamp": "2024-05-01T10:00:00Z"},
            {"country_name": "Japan", "action": "click", "timestamp": "2024-05-01T10:01:00Z"},
            {"country_name": "Japan", "action": "click", "timestamp": "2024-05-01T10:02:00Z"}
        ],
        "preferences": {
            "favorite_regions": ["East Asia", "South Asia", "Middle East", "North Africa"],
            "preferred_safety_rating": 200,
            "budget_range": "high",
            "travel_style": "cultural",
            "population_preference": "medium",
            "visa_preference": "any",
            "last_updated": "2024-05-01T10:02:00Z"
        },
        "timestamp": "2024-05-01T10:02:00Z"
    }"#;
    repository.put(KEY, raw).await.map_err(|err| err.to_string())?;

    let service = PersonalizationService::restore(store, 5).await;
    require!(service.preferences().await.is_none(), "invalid profile should not be restored");
    require_eq!(service.stats().await.total_interactions, 3);

    let recommendations = service.recommendations(&[], Some(3)).await;
    require!(recommendations.iter().all(|r| (0.0..=1.0).contains(&r.score)));
    Ok(())
}

#[tokio::test]
async fn reset_clears_memory_and_storage() -> ServiceTestResult {
    let (repository, store) = memory_store();
    let service = PersonalizationService::restore(store, 5).await;
    for _ in 0..6 {
        service.track_interaction(Interaction::click("India")).await;
    }

    service.reset().await;

    require!(service.preferences().await.is_none());
    require_eq!(service.stats().await.total_interactions, 0);
    require!(repository.get(KEY).await.map_err(|err| err.to_string())?.is_none());

    let names: Vec<String> =
        service.recommendations(&[], None).await.into_iter().map(|r| r.country).collect();
    require_eq!(names, POPULAR_COUNTRIES.iter().map(|n| n.to_string()).collect::<Vec<_>>());
    Ok(())
}

#[tokio::test]
async fn manual_preference_update_is_persisted() -> ServiceTestResult {
    let (_, store) = memory_store();
    let service = PersonalizationService::restore(store.clone(), 5).await;

    let preferences =
        service.update_preference(PreferenceUpdate::BudgetRange(CostCategory::Low)).await;
    require_eq!(preferences.budget_range, CostCategory::Low);

    let stored = stored_state(&store).await?;
    require_eq!(stored.preferences.as_ref().map(|p| p.budget_range), Some(CostCategory::Low));
    require!(stored.interactions.is_empty(), "manual updates do not touch the log");
    Ok(())
}

#[tokio::test]
async fn default_limit_applies_when_none_given() -> ServiceTestResult {
    let (_, store) = memory_store();
    let service = PersonalizationService::restore(store, 3).await;

    require_eq!(service.recommendations(&[], None).await.len(), 3);
    require_eq!(service.recommendations(&[], Some(1)).await.len(), 1);
    Ok(())
}

#[tokio::test]
async fn sqlite_backed_service_survives_reopen() -> ServiceTestResult {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let url = format!("sqlite://{}", dir.path().join("geolens.db").display());

    {
        let pool = connect_with_settings(&url, 2, 5).await.map_err(|err| err.to_string())?;
        migrations::run_pending(&pool).await.map_err(|err| err.to_string())?;
        let service = PersonalizationService::with_pool(pool.clone(), KEY, 5).await;
        let rating = Interaction::rate("Japan", 5).map_err(|err| err.to_string())?;
        service.track_interaction(rating).await;
        pool.close().await;
    }

    let pool = connect_with_settings(&url, 2, 5).await.map_err(|err| err.to_string())?;
    migrations::run_pending(&pool).await.map_err(|err| err.to_string())?;
    let service = PersonalizationService::with_pool(pool, KEY, 5).await;

    let stats = service.stats().await;
    require_eq!(stats.total_interactions, 1);
    require_eq!(stats.average_rating, 5.0);
    Ok(())
}
