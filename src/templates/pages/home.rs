// templates/pages/home.rs

use crate::templates::{card, desktop_layout};
use maud::{html, Markup};

pub fn home_page() -> Markup {
    desktop_layout(
        "Inicio",
        None,
        html! {
            main class="container narrow" {
                h1 { "Programación de visitas" }

                (card("Buscar vivienda", html! {
                    form method="get" action="/agenda" class="search-form" {
                        label for="vivienda" { "Número de vivienda" }
                        input type="number" id="vivienda" name="vivienda" min="1" required;
                        button type="submit" class="primary" { "Abrir agenda" }
                    }
                }))
            }
        },
    )
}
