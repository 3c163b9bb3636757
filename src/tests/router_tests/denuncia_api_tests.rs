use crate::router::handle;
use crate::tests::utils::{body_json, fecha_en, json_request, Fixture};
use chrono::Duration;
use http::Method;
use serde_json::json;

fn put(fx: &Fixture, path: &str, token: &str, body: serde_json::Value) -> astra::Response {
    let req = json_request(Method::PUT, path, Some(token), &body.to_string());
    handle(req, &fx.db)
}

fn get(fx: &Fixture, path: &str, token: &str) -> astra::Response {
    handle(json_request(Method::GET, path, Some(token), ""), &fx.db)
}

#[test]
fn schedule_then_reschedule_full_flow() {
    let fx = Fixture::new();
    let id = fx.denuncia_id;

    let manana = fecha_en(1, 9, 0);
    let resp = put(
        &fx,
        &format!("/api/denuncias/{id}/programacion"),
        &fx.tecnico,
        json!({ "fecha_programacion": manana }),
    );
    assert_eq!(resp.status(), 200);
    let d = body_json(resp);
    assert_eq!(d["estado_denuncia"], "programada");
    assert!(d["fecha_programacion"].as_str().unwrap().starts_with(&manana));
    assert!(d["motivo_reprogramacion"].is_null());

    let pasado = fecha_en(2, 14, 30);
    let resp = put(
        &fx,
        &format!("/api/denuncias/{id}/reprogramacion"),
        &fx.tecnico,
        json!({
            "fecha_programacion": pasado,
            "motivo_reprogramacion": "Lluvia impidió acceso"
        }),
    );
    assert_eq!(resp.status(), 200);
    let d = body_json(resp);
    assert_eq!(d["estado_denuncia"], "reprogramada");
    assert!(d["fecha_programacion"].as_str().unwrap().starts_with(&pasado));
    assert_eq!(d["motivo_reprogramacion"], "Lluvia impidió acceso");

    // Reprogramada can be rescheduled again.
    let resp = put(
        &fx,
        &format!("/api/denuncias/{id}/reprogramacion"),
        &fx.tecnico,
        json!({
            "fecha_programacion": fecha_en(3, 8, 15),
            "motivo_reprogramacion": "Propietario ausente"
        }),
    );
    assert_eq!(resp.status(), 200);
    assert_eq!(body_json(resp)["motivo_reprogramacion"], "Propietario ausente");

    let hist = body_json(get(&fx, &format!("/api/denuncias/{id}/historial"), &fx.tecnico));
    let ops: Vec<&str> = hist
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["operacion"].as_str().unwrap())
        .collect();
    assert_eq!(ops, ["programar", "reprogramar", "reprogramar"]);
}

#[test]
fn cancelled_denuncia_rejects_reschedule_without_changes() {
    let fx = Fixture::new();
    let id = fx.denuncia_id;

    let resp = put(
        &fx,
        &format!("/api/denuncias/{id}/cancelacion"),
        &fx.supervisor,
        json!({ "motivo": "Duplicada" }),
    );
    assert_eq!(resp.status(), 200);
    assert_eq!(body_json(resp)["estado_denuncia"], "cancelada");

    let resp = put(
        &fx,
        &format!("/api/denuncias/{id}/reprogramacion"),
        &fx.tecnico,
        json!({
            "fecha_programacion": fecha_en(1, 10, 0),
            "motivo_reprogramacion": "Otra fecha"
        }),
    );
    assert_eq!(resp.status(), 409);
    let err = body_json(resp);
    assert_eq!(err["mensaje"], "La denuncia fue cancelada");

    let d = body_json(get(&fx, &format!("/api/denuncias/{id}"), &fx.tecnico));
    assert_eq!(d["estado_denuncia"], "cancelada");
    assert!(d["fecha_programacion"].is_null());
    assert!(d["motivo_reprogramacion"].is_null());
}

#[test]
fn realized_denuncia_cannot_be_scheduled_again() {
    let fx = Fixture::new();
    let id = fx.denuncia_id;

    put(
        &fx,
        &format!("/api/denuncias/{id}/programacion"),
        &fx.tecnico,
        json!({ "fecha_programacion": fecha_en(1, 9, 0) }),
    );
    let resp = put(&fx, &format!("/api/denuncias/{id}/realizacion"), &fx.tecnico, json!({}));
    assert_eq!(resp.status(), 200);
    assert_eq!(body_json(resp)["estado_denuncia"], "realizada");

    let resp = put(
        &fx,
        &format!("/api/denuncias/{id}/programacion"),
        &fx.tecnico,
        json!({ "fecha_programacion": fecha_en(2, 9, 0) }),
    );
    assert_eq!(resp.status(), 409);
    assert_eq!(body_json(resp)["mensaje"], "La denuncia ya fue realizada");
}

#[test]
fn reschedule_requires_a_prior_schedule() {
    let fx = Fixture::new();
    let resp = put(
        &fx,
        &format!("/api/denuncias/{}/reprogramacion", fx.denuncia_id),
        &fx.tecnico,
        json!({
            "fecha_programacion": fecha_en(1, 9, 0),
            "motivo_reprogramacion": "Lluvia"
        }),
    );
    assert_eq!(resp.status(), 409);

    let d = body_json(get(&fx, &format!("/api/denuncias/{}", fx.denuncia_id), &fx.tecnico));
    assert_eq!(d["estado_denuncia"], "recibida");
    assert!(d["fecha_programacion"].is_null());
    assert!(d["motivo_reprogramacion"].is_null());
}

#[test]
fn past_date_is_rejected() {
    let fx = Fixture::new();
    let resp = put(
        &fx,
        &format!("/api/denuncias/{}/programacion", fx.denuncia_id),
        &fx.tecnico,
        json!({ "fecha_programacion": fecha_en(-1, 9, 0) }),
    );
    assert_eq!(resp.status(), 422);
    assert_eq!(body_json(resp)["error"], "fecha_en_pasado");
}

#[test]
fn malformed_date_is_bad_request() {
    let fx = Fixture::new();
    let resp = put(
        &fx,
        &format!("/api/denuncias/{}/programacion", fx.denuncia_id),
        &fx.tecnico,
        json!({ "fecha_programacion": "mañana a las nueve" }),
    );
    assert_eq!(resp.status(), 400);
    assert_eq!(body_json(resp)["error"], "solicitud_invalida");
}

#[test]
fn motive_length_boundary() {
    let fx = Fixture::new();
    let id = fx.denuncia_id;
    put(
        &fx,
        &format!("/api/denuncias/{id}/programacion"),
        &fx.tecnico,
        json!({ "fecha_programacion": fecha_en(1, 9, 0) }),
    );

    let resp = put(
        &fx,
        &format!("/api/denuncias/{id}/reprogramacion"),
        &fx.tecnico,
        json!({
            "fecha_programacion": fecha_en(2, 9, 0),
            "motivo_reprogramacion": "x".repeat(501)
        }),
    );
    assert_eq!(resp.status(), 422);
    let d = body_json(get(&fx, &format!("/api/denuncias/{id}"), &fx.tecnico));
    assert_eq!(d["estado_denuncia"], "programada");

    let resp = put(
        &fx,
        &format!("/api/denuncias/{id}/reprogramacion"),
        &fx.tecnico,
        json!({
            "fecha_programacion": fecha_en(2, 9, 0),
            "motivo_reprogramacion": "ñ".repeat(500)
        }),
    );
    assert_eq!(resp.status(), 200);
}

#[test]
fn missing_motive_is_rejected() {
    let fx = Fixture::new();
    let id = fx.denuncia_id;
    put(
        &fx,
        &format!("/api/denuncias/{id}/programacion"),
        &fx.tecnico,
        json!({ "fecha_programacion": fecha_en(1, 9, 0) }),
    );
    let resp = put(
        &fx,
        &format!("/api/denuncias/{id}/reprogramacion"),
        &fx.tecnico,
        json!({ "fecha_programacion": fecha_en(2, 9, 0), "motivo_reprogramacion": "   " }),
    );
    assert_eq!(resp.status(), 422);
}

#[test]
fn requests_without_session_are_unauthorized() {
    let fx = Fixture::new();
    let req = json_request(
        Method::PUT,
        &format!("/api/denuncias/{}/programacion", fx.denuncia_id),
        None,
        &json!({ "fecha_programacion": fecha_en(1, 9, 0) }).to_string(),
    );
    let resp = handle(req, &fx.db);
    assert_eq!(resp.status(), 401);
    assert_eq!(body_json(resp)["error"], "no_autenticado");

    let resp = get(&fx, &format!("/api/denuncias/vivienda/{}", fx.vivienda_id), "not-a-token");
    assert_eq!(resp.status(), 401);
}

#[test]
fn other_municipio_is_forbidden() {
    let fx = Fixture::new();
    let resp = put(
        &fx,
        &format!("/api/denuncias/{}/programacion", fx.denuncia_id),
        &fx.forastero,
        json!({ "fecha_programacion": fecha_en(1, 9, 0) }),
    );
    assert_eq!(resp.status(), 403);

    let resp = get(&fx, &format!("/api/denuncias/vivienda/{}", fx.vivienda_id), &fx.forastero);
    assert_eq!(resp.status(), 403);
}

#[test]
fn tecnico_cannot_cancel() {
    let fx = Fixture::new();
    let resp = put(
        &fx,
        &format!("/api/denuncias/{}/cancelacion", fx.denuncia_id),
        &fx.tecnico,
        json!({}),
    );
    assert_eq!(resp.status(), 403);
}

#[test]
fn cancel_accepts_empty_body() {
    let fx = Fixture::new();
    let req = json_request(
        Method::PUT,
        &format!("/api/denuncias/{}/cancelacion", fx.denuncia_id),
        Some(&fx.supervisor),
        "",
    );
    let resp = handle(req, &fx.db);
    assert_eq!(resp.status(), 200);
}

#[test]
fn unknown_denuncia_is_not_found() {
    let fx = Fixture::new();
    let resp = put(
        &fx,
        "/api/denuncias/99999/programacion",
        &fx.tecnico,
        json!({ "fecha_programacion": fecha_en(1, 9, 0) }),
    );
    assert_eq!(resp.status(), 404);
}

#[test]
fn vivienda_listing_is_newest_first() {
    let fx = Fixture::new();
    let ahora = crate::domain::fechas::now_local();
    let nueva = fx.add_denuncia("Reinfestación", ahora - Duration::hours(1));
    let vieja = fx.add_denuncia("Primera denuncia", ahora - Duration::days(30));

    let list = body_json(get(
        &fx,
        &format!("/api/denuncias/vivienda/{}", fx.vivienda_id),
        &fx.tecnico,
    ));
    let ids: Vec<i64> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["denuncia_id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, [nueva, fx.denuncia_id, vieja]);
}

#[test]
fn empty_household_lists_nothing() {
    let fx = Fixture::new();
    let otra = fx
        .db
        .with_conn(|conn| {
            crate::db::viviendas::insert_vivienda(
                conn,
                Some(fx.municipio_id),
                "CB-0099",
                None,
                crate::domain::fechas::now_local(),
            )
        })
        .unwrap();

    let resp = get(&fx, &format!("/api/denuncias/vivienda/{otra}"), &fx.tecnico);
    assert_eq!(resp.status(), 200);
    assert_eq!(body_json(resp), json!([]));
}

#[test]
fn create_denuncia_starts_recibida() {
    let fx = Fixture::new();
    let req = json_request(
        Method::POST,
        "/api/denuncias",
        Some(&fx.tecnico),
        &json!({
            "vivienda_id": fx.vivienda_id,
            "descripcion": "Chinches en el techo"
        })
        .to_string(),
    );
    let resp = handle(req, &fx.db);
    assert_eq!(resp.status(), 201);
    let d = body_json(resp);
    assert_eq!(d["estado_denuncia"], "recibida");
    assert_eq!(d["descripcion"], "Chinches en el techo");

    let req = json_request(
        Method::POST,
        "/api/denuncias",
        Some(&fx.tecnico),
        &json!({ "vivienda_id": fx.vivienda_id, "descripcion": "  " }).to_string(),
    );
    assert_eq!(handle(req, &fx.db).status(), 400);
}

#[test]
fn unknown_route_is_json_not_found() {
    let fx = Fixture::new();
    let resp = get(&fx, "/api/viviendas", &fx.tecnico);
    assert_eq!(resp.status(), 404);
    assert_eq!(body_json(resp)["error"], "no_encontrado");
}
