//! The demo HTTP surface: the thinnest possible wiring of
//! [`campus_timetable_solver::pipeline::solve`] to a single route. Unlike
//! a real deployment, the whole problem instance travels in the request
//! body instead of being loaded through a persistent `Repository`.

use axum::{http::StatusCode, routing::post, Json, Router};
use campus_timetable_solver::ai::NoopAdvisor;
use campus_timetable_solver::config::{SolveRequest, SolveResponse};
use campus_timetable_solver::domain::{Batch, Classroom, Faculty, Subject};
use campus_timetable_solver::error::SolverError;
use campus_timetable_solver::pipeline;
use campus_timetable_solver::repository::InMemoryRepository;
use campus_timetable_solver::solver::CancellationToken;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SolveHttpRequest {
    classrooms: Vec<Classroom>,
    faculty: Vec<Faculty>,
    subjects: Vec<Subject>,
    batches: Vec<Batch>,
    request: SolveRequest,
}

#[derive(Debug, serde::Serialize)]
struct ErrorBody {
    status: &'static str,
    message: String,
}

async fn solve_handler(
    Json(input): Json<SolveHttpRequest>,
) -> Result<Json<SolveResponse>, (StatusCode, Json<ErrorBody>)> {
    let repo = InMemoryRepository::new(input.classrooms, input.faculty, input.subjects, input.batches);
    let advisor = NoopAdvisor;
    let cancel = CancellationToken::new();

    match pipeline::solve(&repo, input.request, &advisor, &cancel) {
        Ok(response) => Ok(Json(response)),
        Err(SolverError::DataError(message)) => Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorBody {
                status: "data_error",
                message,
            }),
        )),
        Err(SolverError::InternalError(message)) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorBody {
                status: "internal_error",
                message,
            }),
        )),
    }
}

pub async fn run_server() {
    let app = Router::new().route("/v1/schedule/solve", post(solve_handler));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:8080")
        .await
        .unwrap();

    println!("Server running at http://{}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}
