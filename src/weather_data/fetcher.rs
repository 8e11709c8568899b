use crate::error::WeatherError;
use crate::provider::error::ProviderError;
use crate::provider::{ProviderRequest, WeatherProvider};
use crate::types::observation_table::ObservationTable;
use crate::types::query::Query;
use crate::weather_data::observer::{FetchEvent, FetchObserver};
use crate::weather_data::reshape::reshape;
use std::sync::Arc;

/// Runs a validated [`Query`] against a provider and reshapes the answer.
pub struct WeatherFetcher {
    provider: Box<dyn WeatherProvider>,
    observer: Arc<dyn FetchObserver>,
}

impl WeatherFetcher {
    pub fn new(provider: Box<dyn WeatherProvider>, observer: Arc<dyn FetchObserver>) -> Self {
        Self { provider, observer }
    }

    /// Issues exactly one provider request and returns the first location's table.
    pub async fn fetch(&self, query: &Query) -> Result<ObservationTable, WeatherError> {
        let request = ProviderRequest {
            latitude: query.latitude(),
            longitude: query.longitude(),
            start_date: query.start_date(),
            end_date: query.end_date(),
            hourly: query.fields().to_vec(),
        };

        self.observer.on_event(&FetchEvent::RequestIssued {
            latitude: request.latitude,
            longitude: request.longitude,
            start_date: request.start_date,
            end_date: request.end_date,
            fields: request.hourly.clone(),
        });

        let response = self
            .provider
            .weather_api(&request)
            .await?
            .into_iter()
            .next()
            .ok_or(ProviderError::EmptyResponse)?;

        self.observer.on_event(&FetchEvent::LocationResolved {
            latitude: response.latitude,
            longitude: response.longitude,
            elevation: response.elevation,
            timezone: response.timezone.clone(),
            timezone_abbreviation: response.timezone_abbreviation.clone(),
            utc_offset_seconds: response.utc_offset_seconds,
        });

        // Index with the same order that was sent.
        let table = reshape(&request.hourly, response.hourly)?;

        self.observer.on_event(&FetchEvent::TableAssembled {
            rows: table.len(),
            fields: table.fields().len(),
        });
        Ok(table)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::provider::{HourlyBlock, ProviderResponse};
    use crate::weather_data::observer::RecordingObserver;
    use async_trait::async_trait;
    use chrono::{NaiveDate, TimeZone, Utc};
    use std::sync::Mutex;

    /// Provider double answering with `hours` hourly values per requested
    /// field, starting at midnight UTC of the start date.
    pub(crate) struct FakeProvider {
        hours: i64,
        pub(crate) requests: Arc<Mutex<Vec<ProviderRequest>>>,
        empty: bool,
    }

    impl FakeProvider {
        pub(crate) fn hourly(hours: i64) -> Self {
            Self {
                hours,
                requests: Arc::new(Mutex::new(Vec::new())),
                empty: false,
            }
        }

        fn empty() -> Self {
            Self {
                empty: true,
                ..Self::hourly(0)
            }
        }
    }

    #[async_trait]
    impl WeatherProvider for FakeProvider {
        async fn weather_api(
            &self,
            request: &ProviderRequest,
        ) -> Result<Vec<ProviderResponse>, ProviderError> {
            self.requests.lock().unwrap().push(request.clone());
            if self.empty {
                return Ok(vec![]);
            }
            let start = request
                .start_date
                .and_hms_opt(0, 0, 0)
                .unwrap()
                .and_utc()
                .timestamp();
            // Field i gets values i*1000 + hour so columns are distinguishable.
            let variables = (0..request.hourly.len())
                .map(|i| {
                    (0..self.hours)
                        .map(|h| Some((i as i64 * 1000 + h) as f64))
                        .collect()
                })
                .collect();
            Ok(vec![ProviderResponse {
                latitude: request.latitude,
                longitude: request.longitude,
                elevation: 11.0,
                timezone: "GMT".to_string(),
                timezone_abbreviation: "GMT".to_string(),
                utc_offset_seconds: 0,
                hourly: HourlyBlock {
                    time: start,
                    time_end: start + self.hours * 3600,
                    interval: 3600,
                    variables,
                },
            }])
        }
    }

    fn query(fields: &[&str]) -> Query {
        Query::new(
            51.5,
            0.0,
            "2024-01-01",
            "2024-01-02",
            fields.iter().map(|f| f.to_string()).collect(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_fetch_end_to_end() -> Result<(), WeatherError> {
        let provider = FakeProvider::hourly(24);
        let requests = provider.requests.clone();
        let observer = Arc::new(RecordingObserver::new());
        let fetcher = WeatherFetcher::new(Box::new(provider), observer.clone());

        let table = fetcher.fetch(&query(&["snowfall"])).await?;

        assert_eq!(requests.lock().unwrap().len(), 1);
        assert_eq!(table.len(), 24);
        assert_eq!(
            table.timestamps()[0],
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
        );
        assert_eq!(
            table.timestamps()[23],
            Utc.with_ymd_and_hms(2024, 1, 1, 23, 0, 0).unwrap()
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_fetch_preserves_field_order() -> Result<(), WeatherError> {
        let provider = FakeProvider::hourly(3);
        let requests = provider.requests.clone();
        let fetcher = WeatherFetcher::new(Box::new(provider), Arc::new(RecordingObserver::new()));

        let table = fetcher
            .fetch(&query(&["wind_gusts_10m", "snowfall", "visibility"]))
            .await?;

        let sent = requests.lock().unwrap()[0].clone();
        assert_eq!(sent.hourly, vec!["wind_gusts_10m", "snowfall", "visibility"]);
        assert_eq!(sent.start_date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(table.fields(), sent.hourly.as_slice());
        assert_eq!(table.column("wind_gusts_10m").unwrap()[2], Some(2.0));
        assert_eq!(table.column("snowfall").unwrap()[2], Some(1002.0));
        assert_eq!(table.column("visibility").unwrap()[0], Some(2000.0));
        Ok(())
    }

    #[tokio::test]
    async fn test_fetch_reports_resolved_location() -> Result<(), WeatherError> {
        let observer = Arc::new(RecordingObserver::new());
        let fetcher = WeatherFetcher::new(Box::new(FakeProvider::hourly(2)), observer.clone());
        fetcher.fetch(&query(&["snowfall"])).await?;

        let events = observer.events();
        assert_eq!(events.len(), 3);
        assert!(matches!(events[0], FetchEvent::RequestIssued { .. }));
        assert_eq!(
            events[1],
            FetchEvent::LocationResolved {
                latitude: 51.5,
                longitude: 0.0,
                elevation: 11.0,
                timezone: "GMT".to_string(),
                timezone_abbreviation: "GMT".to_string(),
                utc_offset_seconds: 0,
            }
        );
        assert_eq!(events[2], FetchEvent::TableAssembled { rows: 2, fields: 1 });
        Ok(())
    }

    #[tokio::test]
    async fn test_fetch_empty_response() {
        let fetcher = WeatherFetcher::new(
            Box::new(FakeProvider::empty()),
            Arc::new(RecordingObserver::new()),
        );
        let err = fetcher.fetch(&query(&["snowfall"])).await.unwrap_err();
        assert!(matches!(
            err,
            WeatherError::Provider(ProviderError::EmptyResponse)
        ));
    }
}
