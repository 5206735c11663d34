use crate::{
    api::{attendance, employee, health},
    config::Config,
    error::ApiError,
};
use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Malformed or incomplete bodies are validation failures
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| ApiError::ValidationFailed(err.to_string()).into()),
    );

    cfg.route("/health", web::get().to(health::health_check));

    cfg.service(
        web::scope(&config.api_prefix)
            .service(
                web::scope("/employees")
                    // /employees
                    .service(
                        web::resource("")
                            .route(web::get().to(employee::list_employees))
                            .route(web::post().to(employee::create_employee)),
                    )
                    // /employees/{id}
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(employee::get_employee))
                            .route(web::put().to(employee::update_employee))
                            .route(web::delete().to(employee::delete_employee)),
                    ),
            )
            .service(
                web::scope("/attendance")
                    // /attendance
                    .service(
                        web::resource("")
                            .route(web::get().to(attendance::list_attendance))
                            .route(web::post().to(attendance::mark_attendance)),
                    )
                    // /attendance/employee/{employee_id}
                    .service(
                        web::resource("/employee/{employee_id}")
                            .route(web::get().to(attendance::list_employee_attendance)),
                    )
                    // /attendance/{id}
                    .service(
                        web::resource("/{id}").route(web::put().to(attendance::update_attendance)),
                    ),
            ),
    );
}

/// Builds the routed app around an in-memory store, the way `main` wires it.
#[cfg(test)]
#[macro_export]
macro_rules! test_app {
    ($store:expr) => {{
        let store: std::sync::Arc<dyn $crate::db::HrStore> = $store;
        let config = $crate::config::Config::for_tests();
        actix_web::test::init_service(
            actix_web::App::new()
                .wrap(actix_web::middleware::NormalizePath::trim())
                .app_data(actix_web::web::Data::from(store))
                .app_data(actix_web::web::Data::new(config.clone()))
                .configure(|cfg| $crate::routes::configure(cfg, config)),
        )
        .await
    }};
}
