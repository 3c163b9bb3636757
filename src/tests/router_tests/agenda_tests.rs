use crate::domain::fechas::now_local;
use crate::router::handle;
use crate::tests::utils::{body_string, fecha_en, form_request, json_request, page_request, Fixture};
use astra::Body;
use chrono::Duration;
use http::{Method, Request};

#[test]
fn home_page_loads_successfully() {
    let fx = Fixture::new();
    let req = Request::builder()
        .method(Method::GET)
        .uri("/")
        .body(Body::empty())
        .unwrap();

    let resp = handle(req, &fx.db);
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("<!DOCTYPE html>"));
    assert!(body.contains("form"));
}

#[test]
fn agenda_requires_session() {
    let fx = Fixture::new();
    let req = Request::builder()
        .method(Method::GET)
        .uri(format!("/agenda/vivienda/{}", fx.vivienda_id))
        .body(Body::empty())
        .unwrap();

    let resp = handle(req, &fx.db);
    assert_eq!(resp.status(), 401);
    assert!(body_string(resp).contains("<html"));
}

#[test]
fn agenda_shows_calendar_and_forms_for_recibida() {
    let fx = Fixture::new();
    let resp = handle(
        page_request(&format!("/agenda/vivienda/{}", fx.vivienda_id), &fx.tecnico),
        &fx.db,
    );
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("CB-0042"));
    assert!(body.contains("class=\"calendar-grid\""));
    assert!(body.contains(&format!("/agenda/denuncias/{}/programar", fx.denuncia_id)));
    assert!(body.contains("Seleccione un día en el calendario."));
    // Not yet scheduled, so rescheduling is explained instead of offered.
    assert!(!body.contains(&format!("/agenda/denuncias/{}/reprogramar", fx.denuncia_id)));
    assert!(body.contains("La denuncia aún no ha sido programada"));
}

#[test]
fn choosing_a_future_day_offers_the_time_picker() {
    let fx = Fixture::new();
    let manana = now_local().date() + Duration::days(1);
    let uri = format!("/agenda/vivienda/{}?dia={}", fx.vivienda_id, manana);

    let body = body_string(handle(page_request(&uri, &fx.tecnico), &fx.db));
    assert!(body.contains("id=\"time-picker\""));
    assert!(body.contains(&format!("value=\"{manana}\"")));
    assert!(body.contains(&format!("{manana} 08:00")));
}

#[test]
fn submitting_a_slot_redirects_with_notice() {
    let fx = Fixture::new();
    let manana = now_local().date() + Duration::days(1);

    let resp = handle(
        form_request(
            &format!("/agenda/denuncias/{}/programar", fx.denuncia_id),
            &fx.tecnico,
            &format!("dia={manana}&hora=9&minuto=0"),
        ),
        &fx.db,
    );
    assert_eq!(resp.status(), 303);
    let location = resp.headers()["location"].to_str().unwrap().to_string();
    assert!(location.starts_with(&format!("/agenda/vivienda/{}?", fx.vivienda_id)));
    assert!(location.ends_with("aviso=programada"));

    let body = body_string(handle(page_request(&location, &fx.tecnico), &fx.db));
    assert!(body.contains("Visita programada"));
    assert!(body.contains(&format!("{manana} 09:00")));
    assert!(body.contains(&format!("/agenda/denuncias/{}/reprogramar", fx.denuncia_id)));
}

#[test]
fn submit_without_day_re_renders_with_error() {
    let fx = Fixture::new();
    let resp = handle(
        form_request(
            &format!("/agenda/denuncias/{}/programar", fx.denuncia_id),
            &fx.tecnico,
            "hora=9&minuto=0",
        ),
        &fx.db,
    );
    assert_eq!(resp.status(), 400);
    let body = body_string(resp);
    assert!(body.contains("class=\"alert alert-error\""));
    assert!(body.contains("Seleccione un día en el calendario"));
}

#[test]
fn reschedule_form_keeps_motive_on_rejection() {
    let fx = Fixture::new();
    let id = fx.denuncia_id;
    let prog = json_request(
        Method::PUT,
        &format!("/api/denuncias/{id}/programacion"),
        Some(&fx.tecnico),
        &format!("{{\"fecha_programacion\":\"{}\"}}", fecha_en(1, 9, 0)),
    );
    assert_eq!(handle(prog, &fx.db).status(), 200);

    let ayer = now_local().date() - Duration::days(1);
    let resp = handle(
        form_request(
            &format!("/agenda/denuncias/{id}/reprogramar"),
            &fx.tecnico,
            &format!("dia={ayer}&hora=9&minuto=0&motivo=Camino+cortado"),
        ),
        &fx.db,
    );
    assert_eq!(resp.status(), 422);
    let body = body_string(resp);
    assert!(body.contains("class=\"alert alert-error\""));
    assert!(body.contains("Camino cortado"));
}

#[test]
fn cancelled_denuncia_shows_blocked_actions() {
    let fx = Fixture::new();
    let cancel = json_request(
        Method::PUT,
        &format!("/api/denuncias/{}/cancelacion", fx.denuncia_id),
        Some(&fx.supervisor),
        "",
    );
    assert_eq!(handle(cancel, &fx.db).status(), 200);

    let body = body_string(handle(
        page_request(&format!("/agenda/vivienda/{}", fx.vivienda_id), &fx.tecnico),
        &fx.db,
    ));
    assert_eq!(body.matches("La denuncia fue cancelada").count(), 1);
    assert!(!body.contains("class=\"calendar-grid\""));

    let resp = handle(
        form_request(
            &format!("/agenda/denuncias/{}/programar", fx.denuncia_id),
            &fx.tecnico,
            &format!("dia={}&hora=9&minuto=0", now_local().date() + Duration::days(1)),
        ),
        &fx.db,
    );
    assert_eq!(resp.status(), 409);
    assert!(body_string(resp).contains("La denuncia fue cancelada"));
}

#[test]
fn other_municipio_gets_forbidden_page() {
    let fx = Fixture::new();
    let resp = handle(
        page_request(&format!("/agenda/vivienda/{}", fx.vivienda_id), &fx.forastero),
        &fx.db,
    );
    assert_eq!(resp.status(), 403);
}

#[test]
fn out_of_range_month_falls_back_to_current_month() {
    let fx = Fixture::new();
    let hoy = now_local().date();
    let actual = crate::domain::calendario::MesCalendario::containing(hoy);
    let titulo = format!("{} {}", actual.nombre(), actual.anio());

    for query in ["anio=262142&mes=12", "anio=-262143&mes=1", "dia=262142-12-31"] {
        let uri = format!("/agenda/vivienda/{}?{query}", fx.vivienda_id);
        let resp = handle(page_request(&uri, &fx.tecnico), &fx.db);
        assert_eq!(resp.status(), 200);

        let body = body_string(resp);
        assert!(body.contains(&titulo), "{query}");
        assert!(!body.contains("262142"), "{query}");
    }
}

#[test]
fn last_supported_month_renders_a_single_month() {
    let fx = Fixture::new();
    let uri = format!("/agenda/vivienda/{}?anio=9999&mes=12", fx.vivienda_id);
    let resp = handle(page_request(&uri, &fx.tecnico), &fx.db);
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("Diciembre 9999"));
    assert_eq!(body.matches("class=\"calendar-day").count(), 31);
}
