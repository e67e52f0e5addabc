use prometheus::{
    Encoder, HistogramVec, IntCounterVec, IntGauge, Opts, Registry, TextEncoder,
};

#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    pub match_requests_total: IntCounterVec,
    pub match_latency_seconds: HistogramVec,
    pub quotes_total: IntCounterVec,
    pub drivers_registered: IntGauge,
    pub drivers_available: IntGauge,
}

impl Metrics {
    pub fn new() -> Self {
        let registry = Registry::new();

        let match_requests_total = IntCounterVec::new(
            Opts::new("match_requests_total", "Match requests by policy and outcome"),
            &["policy", "outcome"],
        )
        .expect("valid match_requests_total metric");

        let match_latency_seconds = HistogramVec::new(
            prometheus::HistogramOpts::new(
                "match_latency_seconds",
                "Latency of match request handling in seconds",
            ),
            &["policy"],
        )
        .expect("valid match_latency_seconds metric");

        let quotes_total = IntCounterVec::new(
            Opts::new("quotes_total", "Ride quotes computed by vehicle class"),
            &["vehicle_class"],
        )
        .expect("valid quotes_total metric");

        let drivers_registered = IntGauge::new(
            "drivers_registered",
            "Drivers currently in the registry",
        )
        .expect("valid drivers_registered metric");

        let drivers_available = IntGauge::new(
            "drivers_available",
            "Registered drivers currently marked available",
        )
        .expect("valid drivers_available metric");

        registry
            .register(Box::new(match_requests_total.clone()))
            .expect("register match_requests_total");
        registry
            .register(Box::new(match_latency_seconds.clone()))
            .expect("register match_latency_seconds");
        registry
            .register(Box::new(quotes_total.clone()))
            .expect("register quotes_total");
        registry
            .register(Box::new(drivers_registered.clone()))
            .expect("register drivers_registered");
        registry
            .register(Box::new(drivers_available.clone()))
            .expect("register drivers_available");

        Self {
            registry,
            match_requests_total,
            match_latency_seconds,
            quotes_total,
            drivers_registered,
            drivers_available,
        }
    }

    pub fn encode(&self) -> Result<String, String> {
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();

        TextEncoder::new()
            .encode(&metric_families, &mut buffer)
            .map_err(|err| format!("failed to encode metrics: {err}"))?;

        String::from_utf8(buffer).map_err(|err| format!("metrics are not valid utf8: {err}"))
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
