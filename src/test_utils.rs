//! Shared test utilities for fleet-advisor
//!
//! This module provides common test fixtures and a scriptable generator
//! used across multiple test modules.

#[cfg(test)]
pub mod test_helpers {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use crate::advisor::provider::{GenerateRequest, Generator, RemoteCallError};
    use crate::fleet::MaintenanceCase;

    /// Dashboard-shaped maintenance case: one vehicle, two own records, one foreign
    pub const CASE_JSON: &str = r#"{
    "vehicle": {
        "id": "v2", "vin": "IND102938475", "make": "Mahindra", "model": "Bolero Neo",
        "year": 2022, "plate": "DL-04-CA-8901", "type": "SUV", "status": "In Maintenance",
        "fuelType": "Diesel", "mileage": 35000, "nextServiceDue": "2024-04-10"
    },
    "history": [
        { "id": "m3", "vehicleId": "v2", "serviceType": "Brake Pads", "date": "2024-03-01",
          "mileage": 34950, "cost": 3200, "status": "Completed", "technician": "Amit Mistry" },
        { "id": "m1", "vehicleId": "v2", "serviceType": "Clutch Replacement", "date": "2024-02-10",
          "mileage": 34900, "cost": 12500, "status": "In Progress", "technician": "Amit Mistry",
          "description": "Heavy wear detected on clutch plate." },
        { "id": "m2", "vehicleId": "v3", "serviceType": "Oil Filter & Coolant", "date": "2023-11-15",
          "mileage": 55000, "cost": 4200, "status": "Completed", "technician": "Amit Mistry" }
    ]
}"#;

    pub const ROUTE_REPLY: &str = r#"{"route_name": "Mumbai-Pune Expressway",
        "steps": ["Eastern Freeway", "NH48", "Pune Ring Road"],
        "total_distance_km": 148, "estimated_duration_min": 175,
        "fuel_cost_estimate": 2100, "efficiency_score": 91}"#;

    pub const FORECAST_REPLY: &str = r#"[
        {"task": "Clutch Inspection", "urgency": "High", "estimated_mileage": 36000,
         "estimated_cost": 4500, "reason": "Follow-up on clutch replacement"}
    ]"#;

    pub fn sample_case() -> MaintenanceCase {
        serde_json::from_str(CASE_JSON).expect("CASE_JSON is valid")
    }

    /// A 429 the way the Gemini adapter reports it
    pub fn quota_error() -> RemoteCallError {
        RemoteCallError::Api {
            provider: "Scripted".to_string(),
            code: 429,
            message: "RESOURCE_EXHAUSTED".to_string(),
            quota_exceeded: true,
        }
    }

    pub fn server_error() -> RemoteCallError {
        RemoteCallError::Api {
            provider: "Scripted".to_string(),
            code: 500,
            message: "internal".to_string(),
            quota_exceeded: false,
        }
    }

    type Reply = dyn Fn(&GenerateRequest) -> Result<String, RemoteCallError> + Send + Sync;

    /// Generator double that counts calls and answers from a closure
    ///
    /// Clones share counters, so a test can keep one clone after handing
    /// another to the proxy.
    #[derive(Clone)]
    pub struct ScriptedGenerator {
        calls: Arc<AtomicUsize>,
        requests: Arc<Mutex<Vec<GenerateRequest>>>,
        reply: Arc<Reply>,
        delay: Duration,
    }

    impl ScriptedGenerator {
        pub fn with(
            reply: impl Fn(&GenerateRequest) -> Result<String, RemoteCallError> + Send + Sync + 'static,
        ) -> Self {
            Self {
                calls: Arc::new(AtomicUsize::new(0)),
                requests: Arc::new(Mutex::new(Vec::new())),
                reply: Arc::new(reply),
                delay: Duration::ZERO,
            }
        }

        pub fn replying(text: &str) -> Self {
            let text = text.to_string();
            Self::with(move |_| Ok(text.clone()))
        }

        pub fn failing(error: RemoteCallError) -> Self {
            Self::with(move |_| Err(error.clone()))
        }

        /// Answers each operation with a valid payload, picked by prompt shape
        pub fn healthy() -> Self {
            Self::with(|request| {
                let reply = if request.prompt.starts_with("Analyze:") {
                    FORECAST_REPLY
                } else if request.schema.is_some() {
                    ROUTE_REPLY
                } else {
                    "Mumbai, Navi Mumbai, Thane, Pune, Nashik"
                };
                Ok(reply.to_string())
            })
        }

        /// Sleep this long inside every call
        pub fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = delay;
            self
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        pub fn last_request(&self) -> Option<GenerateRequest> {
            self.requests.lock().unwrap().last().cloned()
        }
    }

    impl Generator for ScriptedGenerator {
        fn name(&self) -> &str {
            "Scripted"
        }

        async fn generate(&self, request: &GenerateRequest) -> Result<String, RemoteCallError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.requests.lock().unwrap().push(request.clone());
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            (self.reply)(request)
        }
    }
}
