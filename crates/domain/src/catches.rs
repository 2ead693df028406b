//! Catches: entities, statistics and the repository contract.

use std::collections::{BTreeMap, HashSet};

use async_trait::async_trait;

use crate::outcome::DataResult;

/// A catch as listed in the grid.
#[derive(Clone, Debug, PartialEq)]
pub struct CatchEntity {
    pub id: String,
    /// Species name.
    pub name: String,
    pub description: String,
    /// `YYYY-MM-DD`.
    pub date_caught: String,
    pub location: String,
    pub image_url: Option<String>,
    pub weight: Option<f64>,
    pub length: Option<f64>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CatchDetailsEntity {
    pub id: String,
    pub species: String,
    pub weight: Option<f64>,
    pub length: Option<f64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Full RFC 3339 timestamp of the catch.
    pub timestamp: String,
    pub photo_url: Option<String>,
    pub location: String,
    pub date_caught: String,
    pub notes: Option<String>,
    /// Weather readings recorded by the backend, stringified.
    pub weather: BTreeMap<String, String>,
}

/// A new catch on its way to the backend.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SubmitCatchEntity {
    pub species: String,
    pub weight: Option<f64>,
    pub length: Option<f64>,
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub caught_at: Option<String>,
    pub notes: Option<String>,
    /// JPEG bytes, base64 encoded.
    pub image_base64: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FishingInsights {
    pub insights: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct StatsEntity {
    pub total_catches: usize,
    pub species_breakdown: BTreeMap<String, usize>,
    pub unique_species: usize,
    pub unique_locations: usize,
    pub average_weight: Option<f64>,
    pub average_length: Option<f64>,
    pub biggest_catch: Option<CatchEntity>,
    pub most_recent_catch: Option<CatchEntity>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SpeciesData {
    pub name: String,
    pub count: usize,
    /// Share of all catches, in `0.0..=1.0`.
    pub percentage: f64,
}

impl StatsEntity {
    /// Aggregates a list of catches.
    ///
    /// Averages only consider catches that carry the measurement; they are
    /// `None` when none does.
    pub fn from_catches(catches: &[CatchEntity]) -> Self {
        let mut species_breakdown = BTreeMap::new();
        for catch in catches {
            *species_breakdown.entry(catch.name.clone()).or_insert(0) += 1;
        }
        let unique_locations = catches
            .iter()
            .map(|c| c.location.as_str())
            .collect::<HashSet<_>>()
            .len();

        let biggest_catch = catches
            .iter()
            .filter(|c| c.weight.is_some())
            .max_by(|a, b| a.weight.partial_cmp(&b.weight).unwrap_or(std::cmp::Ordering::Equal))
            .cloned();
        let most_recent_catch = catches
            .iter()
            .max_by(|a, b| a.date_caught.cmp(&b.date_caught))
            .cloned();

        Self {
            total_catches: catches.len(),
            unique_species: species_breakdown.len(),
            species_breakdown,
            unique_locations,
            average_weight: average(catches.iter().filter_map(|c| c.weight)),
            average_length: average(catches.iter().filter_map(|c| c.length)),
            biggest_catch,
            most_recent_catch,
        }
    }

    /// Species sorted by count, most caught first.
    pub fn species_data(&self) -> Vec<SpeciesData> {
        let total = self.total_catches;
        let mut data = self
            .species_breakdown
            .iter()
            .map(|(name, count)| SpeciesData {
                name: name.clone(),
                count: *count,
                percentage: if total == 0 {
                    0.0
                } else {
                    *count as f64 / total as f64
                },
            })
            .collect::<Vec<_>>();
        data.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
        data
    }
}

fn average(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}

#[async_trait]
pub trait CatchRepository: Send + Sync {
    /// Network first; falls back to the local cache when the network fails
    /// and the cache is not empty.
    async fn catches(&self) -> DataResult<Vec<CatchEntity>>;

    /// Network only; replaces the local cache.
    async fn refresh_catches(&self) -> DataResult<Vec<CatchEntity>>;

    /// Cache first, then network.
    async fn catch_details(&self, id: &str) -> DataResult<CatchDetailsEntity>;

    /// Returns the id assigned by the backend.
    async fn submit_catch(&self, entity: SubmitCatchEntity) -> DataResult<String>;

    async fn delete_catch(&self, id: &str) -> DataResult<()>;

    async fn catch_stats(&self) -> DataResult<StatsEntity>;

    async fn fishing_insights(&self) -> DataResult<FishingInsights>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catch(id: &str, name: &str, location: &str, date: &str, weight: Option<f64>) -> CatchEntity {
        CatchEntity {
            id: id.to_string(),
            name: name.to_string(),
            description: String::new(),
            date_caught: date.to_string(),
            location: location.to_string(),
            image_url: None,
            weight,
            length: None,
        }
    }

    #[test]
    fn stats_of_empty_list() {
        let stats = StatsEntity::from_catches(&[]);
        assert_eq!(stats.total_catches, 0);
        assert_eq!(stats.average_weight, None);
        assert_eq!(stats.biggest_catch, None);
        assert!(stats.species_data().is_empty());
    }

    #[test]
    fn stats_aggregate_catches() {
        let catches = vec![
            catch("1", "Bass", "Lake Erie", "2024-05-01", Some(2.0)),
            catch("2", "Bass", "Lake Erie", "2024-06-12", Some(4.0)),
            catch("3", "Pike", "River Po", "2024-04-20", None),
        ];
        let stats = StatsEntity::from_catches(&catches);

        assert_eq!(stats.total_catches, 3);
        assert_eq!(stats.unique_species, 2);
        assert_eq!(stats.unique_locations, 2);
        assert_eq!(stats.average_weight, Some(3.0));
        assert_eq!(stats.average_length, None);
        assert_eq!(stats.biggest_catch.map(|c| c.id), Some("2".to_string()));
        assert_eq!(stats.most_recent_catch.map(|c| c.id), Some("2".to_string()));
    }

    #[test]
    fn species_data_sorted_by_count() {
        let catches = vec![
            catch("1", "Pike", "a", "2024-01-01", None),
            catch("2", "Bass", "a", "2024-01-02", None),
            catch("3", "Bass", "a", "2024-01-03", None),
            catch("4", "Bass", "a", "2024-01-04", None),
        ];
        let data = StatsEntity::from_catches(&catches).species_data();
        assert_eq!(data[0].name, "Bass");
        assert_eq!(data[0].count, 3);
        assert!((data[0].percentage - 0.75).abs() < f64::EPSILON);
        assert_eq!(data[1].name, "Pike");
    }
}
