use axum::response::Response;
use serde::Serialize;

use crate::middleware::flash::{render, Flash};

#[derive(Debug, Serialize)]
struct HomePage {
    title: &'static str,
    links: [(&'static str, &'static str); 6],
}

pub async fn index(flash: Flash) -> Response {
    render(
        flash,
        HomePage {
            title: "Showbill",
            links: [
                ("venues", "/venues"),
                ("artists", "/artists"),
                ("shows", "/shows"),
                ("new_venue", "/venues/create"),
                ("new_artist", "/artists/create"),
                ("new_show", "/shows/create"),
            ],
        },
    )
}
