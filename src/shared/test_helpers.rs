#[cfg(test)]
use crate::features::auth::model::AuthenticatedUser;

#[cfg(test)]
use crate::features::reports::models::{Geolocation, Report, ReportStatus, Urgency};

#[cfg(test)]
use crate::features::workers::models::Worker;

#[cfg(test)]
use axum::{extract::Request, middleware::Next, response::Response, Router};

#[cfg(test)]
use fake::{Fake, Faker};

/// A pending road report at the given timestamp; tests adjust the rest
#[cfg(test)]
pub fn report(id: &str, date: &str, time: &str, urgency: Option<Urgency>) -> Report {
    Report {
        id: id.to_string(),
        serial_number: id.parse().unwrap_or(0),
        request_id: format!("JH2024{:0>3}", id),
        category: "Road Maintenance".to_string(),
        area: "Ranchi Central".to_string(),
        time: time.to_string(),
        date: date.to_string(),
        status: ReportStatus::Pending,
        description: "Test report".to_string(),
        image: None,
        audio_note: None,
        geolocation: Geolocation {
            lat: 23.3441,
            lng: 85.3096,
            address: "Main Road".to_string(),
        },
        additional_notes: None,
        landmarks: None,
        urgency,
    }
}

#[cfg(test)]
pub fn seed_reports() -> Vec<Report> {
    crate::shared::seed::parse("reports.json", crate::shared::seed::REPORTS_JSON).unwrap()
}

#[cfg(test)]
pub fn seed_workers() -> Vec<Worker> {
    crate::shared::seed::parse("workers.json", crate::shared::seed::WORKERS_JSON).unwrap()
}

/// Reports with random but well-formed timestamps and urgencies
#[cfg(test)]
pub fn random_reports(count: usize) -> Vec<Report> {
    const LEVELS: [Option<Urgency>; 5] = [
        None,
        Some(Urgency::Low),
        Some(Urgency::Medium),
        Some(Urgency::High),
        Some(Urgency::Critical),
    ];

    (0..count)
        .map(|i| {
            let date = format!(
                "{:02}/{:02}/2025",
                (1..29).fake::<u32>(),
                (1..13).fake::<u32>()
            );
            let time = format!(
                "{:02}:{:02} {}",
                (1..13).fake::<u32>(),
                (0..60).fake::<u32>(),
                if Faker.fake::<bool>() { "PM" } else { "AM" }
            );
            let urgency = LEVELS[(0..LEVELS.len()).fake::<usize>()];
            report(&(i + 1).to_string(), &date, &time, urgency)
        })
        .collect()
}

#[cfg(test)]
pub fn worker(id: &str, category: &str, available: bool) -> Worker {
    Worker {
        id: id.to_string(),
        name: Faker.fake::<String>(),
        category: category.to_string(),
        contact: "+91 9000000000".to_string(),
        area: "Ranchi Central".to_string(),
        available,
    }
}

#[cfg(test)]
pub fn create_admin_user() -> AuthenticatedUser {
    let now = chrono::Utc::now();
    AuthenticatedUser {
        username: "admin".to_string(),
        signed_in_at: now,
        expires_at: now + chrono::Duration::hours(8),
    }
}

#[cfg(test)]
async fn inject_admin_middleware(mut request: Request, next: Next) -> Response {
    request.extensions_mut().insert(create_admin_user());
    next.run(request).await
}

/// Wraps a feature router so every request carries a signed-in admin
#[cfg(test)]
pub fn with_admin_session(router: Router) -> Router {
    router.layer(axum::middleware::from_fn(inject_admin_middleware))
}
