//! AWS Lambda handler for single-household stress tests
//!
//! Accepts a household as JSON through a Lambda Function URL and returns the
//! full stress test result: pool at start, cost schedule, depletion ledger
//! and coverage summary.

use aws_lambda_events::event::lambda_function_urls::{
    LambdaFunctionUrlRequest, LambdaFunctionUrlResponse,
};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use ltc_stress_test::household::current_year;
use ltc_stress_test::{Household, ScenarioRunner, StressTestConfig, StressTestResult};
use serde::{Deserialize, Serialize};

/// Request body: a household plus run options
#[derive(Debug, Deserialize)]
pub struct StressTestRequest {
    /// Four-digit birth year; overrides `current_age` when present
    #[serde(default)]
    pub birth_year: Option<i32>,

    /// Clamp inputs into their ranges instead of rejecting them
    #[serde(default)]
    pub normalize: bool,

    /// Include pre-scenario accumulation rows (default: true)
    #[serde(default = "default_true")]
    pub detailed_output: bool,

    #[serde(flatten)]
    pub household: Household,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Serialize)]
pub struct StressTestResponse {
    pub result: StressTestResult,
    pub execution_time_ms: u64,
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<&'a str>,
}

fn response(status_code: i64, body: Option<String>) -> Result<LambdaFunctionUrlResponse, Error> {
    let mut response = LambdaFunctionUrlResponse {
        status_code,
        headers: Default::default(),
        body,
        is_base64_encoded: false,
        cookies: Vec::new(),
    };
    response.headers.insert("content-type", "application/json".parse()?);
    response.headers.insert("access-control-allow-origin", "*".parse()?);
    response.headers.insert("access-control-allow-methods", "POST, OPTIONS".parse()?);
    response.headers.insert("access-control-allow-headers", "Content-Type".parse()?);
    Ok(response)
}

fn error_response(status: i64, message: &str, field: Option<&str>) -> Result<LambdaFunctionUrlResponse, Error> {
    let body = serde_json::to_string(&ErrorBody { error: message, field })?;
    response(status, Some(body))
}

/// Lambda handler function
async fn handler(
    event: LambdaEvent<LambdaFunctionUrlRequest>,
) -> Result<LambdaFunctionUrlResponse, Error> {
    let start = std::time::Instant::now();
    let request = event.payload;

    // CORS preflight
    if request.request_context.http.method.as_deref() == Some("OPTIONS") {
        return response(200, None);
    }

    let body = request.body.unwrap_or_else(|| "{}".to_string());
    let parsed: StressTestRequest = match serde_json::from_str(&body) {
        Ok(r) => r,
        Err(e) => return error_response(400, &format!("Invalid JSON: {}", e), None),
    };

    let household = match parsed.birth_year {
        Some(year) => parsed.household.with_birth_year(year, current_year()),
        None => parsed.household,
    };
    let config = StressTestConfig {
        detailed_output: parsed.detailed_output,
        normalize_inputs: parsed.normalize,
    };

    let runner = ScenarioRunner::new();
    let result = match runner.run(&household, config) {
        Ok(result) => result,
        Err(e) => return error_response(400, &e.to_string(), Some(e.field())),
    };

    log::info!(
        "Household {}: pool at start {:.2}, shortfall year {:?}",
        result.household_id,
        result.pool_at_start,
        result.depletion.first_shortfall_year
    );

    let body = StressTestResponse {
        result,
        execution_time_ms: start.elapsed().as_millis() as u64,
    };
    response(200, Some(serde_json::to_string(&body)?))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}
