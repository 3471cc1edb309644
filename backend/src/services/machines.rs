//! Machine screens.

use crate::error::AppError;
use crate::services::{optional, required, see_other};
use crate::state::AppState;
use crate::store::{self, machines};
use actix_web::{web, HttpResponse};
use mms_common::model::machine::NewMachine;
use mms_common::requests::{MachineForm, SearchQuery};
use serde_json::json;

const LIST_PATH: &str = "/machines_ui";

/// Registers:
///
/// *   **`GET /machines_ui?q=`**: machine list, filtered by name, id or location.
/// *   **`POST /add_machine_ui`**, **`POST /edit_machine/{id}`**,
///     **`POST /delete_machine/{id}`**: form actions redirecting to the list.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(LIST_PATH, web::get().to(list))
        .route("/add_machine_ui", web::post().to(add))
        .route("/edit_machine/{id}", web::post().to(edit))
        .route("/delete_machine/{id}", web::post().to(delete));
}

fn parse_form(form: MachineForm) -> Result<NewMachine, AppError> {
    Ok(NewMachine {
        name: required("name", &form.name)?,
        location: optional(&form.location),
        last_maintenance: optional(&form.last_maintenance),
    })
}

pub async fn list(
    state: web::Data<AppState>,
    query: web::Query<SearchQuery>,
) -> Result<HttpResponse, AppError> {
    let query = query.into_inner();
    let term = query.term().map(str::to_string);
    let found = store::with_connection(&state.config.database_path, move |conn| {
        Ok(machines::list(conn, term.as_deref())?)
    })
    .await?;
    state
        .views
        .page("machines", &json!({ "machines": found, "query": query.q }))
}

pub async fn add(
    state: web::Data<AppState>,
    form: web::Form<MachineForm>,
) -> Result<HttpResponse, AppError> {
    let machine = parse_form(form.into_inner())?;
    store::with_connection(&state.config.database_path, move |conn| {
        Ok(machines::insert(conn, &machine)?)
    })
    .await?;
    Ok(see_other(LIST_PATH))
}

pub async fn edit(
    state: web::Data<AppState>,
    id: web::Path<i64>,
    form: web::Form<MachineForm>,
) -> Result<HttpResponse, AppError> {
    let id = id.into_inner();
    let machine = parse_form(form.into_inner())?;
    let updated = store::with_connection(&state.config.database_path, move |conn| {
        Ok(machines::update(conn, id, &machine)?)
    })
    .await?;
    if !updated {
        return Err(AppError::NotFound(format!("machine {}", id)));
    }
    Ok(see_other(LIST_PATH))
}

pub async fn delete(
    state: web::Data<AppState>,
    id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = id.into_inner();
    store::with_connection(&state.config.database_path, move |conn| {
        Ok(machines::delete(conn, id)?)
    })
    .await?;
    Ok(see_other(LIST_PATH))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestContext;
    use actix_web::http::{header, StatusCode};
    use actix_web::{test, App};

    #[actix_web::test]
    async fn add_search_edit_delete() {
        let ctx = TestContext::new();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(ctx.state.clone()))
                .configure(crate::services::configure),
        )
        .await;

        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/add_machine_ui")
                .set_form([("name", "Lathe"), ("location", "Hall A"), ("last_maintenance", "")])
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/machines_ui");

        let stored = machines::list(&ctx.conn(), None).unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].last_maintenance, None);

        let body = test::call_and_read_body(
            &app,
            test::TestRequest::get().uri("/machines_ui?q=Hall").to_request(),
        )
        .await;
        assert!(String::from_utf8(body.to_vec()).unwrap().contains("value=\"Lathe\""));

        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/edit_machine/1")
                .set_form([("name", "CNC lathe"), ("location", "Hall C"), ("last_maintenance", "2024-06-01")])
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(machines::list(&ctx.conn(), None).unwrap()[0].name, "CNC lathe");

        let resp = test::call_service(
            &app,
            test::TestRequest::post().uri("/delete_machine/1").to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert!(machines::list(&ctx.conn(), None).unwrap().is_empty());
    }

    #[actix_web::test]
    async fn editing_a_missing_machine_is_404_and_blank_name_is_400() {
        let ctx = TestContext::new();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(ctx.state.clone()))
                .configure(crate::services::configure),
        )
        .await;

        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/edit_machine/42")
                .set_form([("name", "Ghost")])
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/add_machine_ui")
                .set_form([("name", "  ")])
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn deleting_a_machine_with_history_succeeds() {
        let ctx = TestContext::new();
        let lathe = machines::insert(
            &ctx.conn(),
            &NewMachine {
                name: "Lathe".into(),
                location: None,
                last_maintenance: None,
            },
        )
        .unwrap();
        crate::store::logs::insert(
            &ctx.conn(),
            &mms_common::model::maintenance_log::NewMaintenanceLog {
                machine_id: lathe,
                description: "Oil change".into(),
                date: "2024-05-01".into(),
            },
        )
        .unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(ctx.state.clone()))
                .configure(crate::services::configure),
        )
        .await;

        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri(&format!("/delete_machine/{lathe}"))
                .to_request(),
        )
        .await;

        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert!(machines::list(&ctx.conn(), None).unwrap().is_empty());
    }
}
