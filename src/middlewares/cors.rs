use actix_cors::Cors;

pub fn create_cors() -> Cors {
    Cors::default()
        // Production deployments should pin this to the election portal
        // origin.
        .allowed_origin_fn(|_, _req_head| true)
        .allowed_methods(vec!["GET", "POST", "PATCH", "DELETE", "OPTIONS"])
        .allow_any_header()
        .supports_credentials()
        .max_age(3600)
}
