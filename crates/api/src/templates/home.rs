use maud::{html, Markup, DOCTYPE};

/// Routes advertised on the landing page, with a short description each.
pub const ROUTES: &[(&str, &str)] = &[
    ("/api/v1.0/precipitation", "precipitation for the last year of data"),
    (
        "/api/v1.0/precipitation/<date_in_format_YYYY-MM-DD>",
        "precipitation recorded on one date",
    ),
    ("/api/v1.0/stations", "all station ids"),
    ("/api/v1.0/tobs", "temperature observations for the last year of data"),
    (
        "/api/v1.0/tobs/mostactivestation",
        "temperature summary of the most active station",
    ),
    (
        "/api/v1.0/<start_date_in_format_YYYY-MM-DD>",
        "min/max/avg temperature from a start date",
    ),
    (
        "/api/v1.0/<start_date_in_format_YYYY-MM-DD>/<end_date_in_format_YYYY-MM-DD>",
        "min/max/avg temperature between two dates",
    ),
];

pub fn home_page(api_base: &str) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                title { "Hawaii Climate API" }
            }
            body {
                h1 { "Available Routes:" }
                ul {
                    @for (path, description) in ROUTES {
                        li {
                            code { (api_base) (path) }
                            " - " (description)
                        }
                    }
                }
                p {
                    a href={ (api_base) "/docs" } { "API Docs" }
                }
            }
        }
    }
}
