use http::{Method, StatusCode};
use lambda_runtime::Error;
use serde_json::Value;
use std::sync::Arc;
use student_shared::{
    error::ApiError,
    store::StudentStore,
    students,
    types::{RequestDescriptor, ResponseDescriptor},
    AppState,
};

/// Endpoints served by this Lambda
#[derive(Debug, PartialEq, Eq)]
enum Route<'a> {
    // GET /student
    ListStudents,
    // GET /student/{studentid}
    GetStudent { student_id: &'a str },
    // POST /student
    CreateStudent,
    // PUT /student?studentid=
    UpdateStudent,
    // DELETE /student?studentid=
    DeleteStudent,
}

/// First match wins. `{studentid}` is whatever follows the final `/`, unvalidated.
fn match_route<'a>(method: &Method, path: &'a str) -> Option<Route<'a>> {
    match (method, path) {
        (&Method::GET, "/student") => Some(Route::ListStudents),
        (&Method::GET, _) => path.strip_prefix("/student/").map(|rest| Route::GetStudent {
            student_id: rest.rsplit_once('/').map_or(rest, |(_, last)| last),
        }),
        (&Method::POST, "/student") => Some(Route::CreateStudent),
        (&Method::PUT, "/student") => Some(Route::UpdateStudent),
        (&Method::DELETE, "/student") => Some(Route::DeleteStudent),
        _ => None,
    }
}

/// Main Lambda handler - never fails; every fault becomes an error response
pub(crate) async fn function_handler(
    event: Value,
    state: Arc<AppState>,
) -> Result<ResponseDescriptor, Error> {
    Ok(dispatch(event, state.store.as_ref()).await)
}

pub(crate) async fn dispatch(event: Value, store: &dyn StudentStore) -> ResponseDescriptor {
    let request: RequestDescriptor = match serde_json::from_value(event) {
        Ok(request) => request,
        Err(e) => return ApiError::BadRequest(e.to_string()).into_response(),
    };

    let method = match request.http_method.as_deref() {
        Some(method) if !method.is_empty() => method,
        _ => {
            return ApiError::BadRequest("HTTP method not provided in event".to_string())
                .into_response()
        }
    };
    let path = request.path.as_deref().unwrap_or("");
    tracing::info!("Student API invoked - Method: {} Path: {}", method, path);

    let route = Method::from_bytes(method.as_bytes())
        .ok()
        .and_then(|method| match_route(&method, path));

    let outcome = match route {
        Some(Route::ListStudents) => students::list_students(store).await,
        Some(Route::GetStudent { student_id }) => students::get_student(store, student_id).await,
        Some(Route::CreateStudent) => students::create_student(store, &request).await,
        Some(Route::UpdateStudent) => students::update_student(store, &request).await,
        Some(Route::DeleteStudent) => students::delete_student(store, &request).await,
        None => {
            tracing::warn!("No route matched - Method: {} Path: {}", method, path);
            Err(ApiError::NotFound("Endpoint not found".to_string()))
        }
    };

    match outcome {
        Ok(body) => ResponseDescriptor::json(StatusCode::OK, &body),
        Err(e) => e.into_response(),
    }
}
