//! Timetable Upload Route
//!
//! - POST /dashboard/timetable - Multipart form with `startDate`, `endDate`
//!   and `file`; re-renders the dashboard with the form's outcome

use axum::{
    extract::{Multipart, State},
    http::HeaderMap,
    response::{IntoResponse, Redirect, Response},
};
use std::sync::Arc;

use super::dashboard::render_page;
use super::request_cookie;
use crate::session::{SessionProvider, SessionStatus};
use crate::upload::{DateField, SelectedFile, UploadForm};
use crate::web::error::WebResult;
use crate::web::state::AppState;
use crate::web::templates::UploadFormView;

/// POST /dashboard/timetable
pub async fn upload_timetable(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    multipart: Multipart,
) -> WebResult<Response> {
    let client = state.backend.with_cookie(request_cookie(&headers));
    let session = client.session().await;

    match session.status {
        SessionStatus::Authenticated => {}
        // The loading page refreshes with a GET, which this route does not serve
        SessionStatus::Loading => return Ok(Redirect::to("/dashboard").into_response()),
        SessionStatus::Unauthenticated => {
            return render_page(&state, client, session.status, UploadFormView::default()).await;
        }
    }

    let mut form = read_form(multipart).await?;
    if let Err(e) = form.submit(state.upload_services(&client)).await {
        tracing::debug!(error = %e, validation = e.is_validation(), "Timetable upload rejected");
    }

    render_page(&state, client, session.status, UploadFormView::from(&form)).await
}

/// Fill an [`UploadForm`] from the multipart fields
async fn read_form(mut multipart: Multipart) -> WebResult<UploadForm> {
    let mut form = UploadForm::new();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();

        if name == "file" {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let content_type = field.content_type().unwrap_or_default().to_string();
            let bytes = field.bytes().await?;

            // Browsers send an empty part when no file was picked
            if !file_name.is_empty() || !bytes.is_empty() {
                form.select_file(Some(SelectedFile::new(file_name, content_type, bytes.to_vec())));
            }
        } else if let Some(date) = DateField::from_name(&name) {
            let value = field.text().await?;
            form.set_date(date, value);
        }
    }

    Ok(form)
}
