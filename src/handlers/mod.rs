pub mod alerts;
pub mod applications;
pub mod contracts;
pub mod disputes;
pub mod ml;
pub mod users;

use actix_web::web;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    // ── User routes (all protected — require valid JWT) ──
    cfg.service(
        web::scope("/users")
            .route("/me", web::get().to(users::me))
            .route("/companies", web::get().to(users::all_companies))
            .route("/companies/pending", web::get().to(users::pending_companies))
            .route("/companies/{id}/verify", web::put().to(users::verify_company))
            .route("/{id}/block", web::put().to(users::block_user))
            .route("/{id}/unblock", web::put().to(users::unblock_user)),
    );

    // ── Contract + application routes ──
    // Fixed paths are registered before the `{id}` catch-alls.
    cfg.service(
        web::scope("/contracts")
            .route("", web::get().to(contracts::list_contracts))
            .route("", web::post().to(contracts::create_contract))
            .route("/my-contracts", web::get().to(contracts::my_contracts))
            .route(
                "/applications/my-applications",
                web::get().to(applications::my_applications),
            )
            .route(
                "/applications/{id}/status",
                web::put().to(applications::update_application_status),
            )
            .route("/{id}", web::get().to(contracts::get_contract))
            .route("/{id}/apply", web::post().to(applications::apply_to_contract))
            .route(
                "/{id}/applications",
                web::get().to(applications::list_applications),
            )
            .route(
                "/{contract_id}/applications/{application_id}/select",
                web::put().to(applications::select_farmer),
            )
            .route(
                "/{id}/upload-legal-contract",
                web::post().to(contracts::upload_legal_contract),
            )
            .route(
                "/{id}/verify-legal",
                web::put().to(contracts::verify_legal_contract),
            )
            .route("/{id}/payment", web::put().to(contracts::update_payment))
            .route("/{id}/delivery", web::post().to(contracts::add_delivery))
            .route(
                "/{id}/mark-in-progress",
                web::put().to(contracts::mark_in_progress),
            )
            .route(
                "/{id}/mark-completed",
                web::put().to(contracts::mark_completed),
            )
            .route("/{id}/cancel", web::put().to(contracts::cancel_contract))
            .route("/{id}/status", web::put().to(contracts::update_status)),
    );

    // ── Dispute routes ──
    cfg.service(
        web::scope("/disputes")
            .route("", web::get().to(disputes::list_disputes))
            .route("", web::post().to(disputes::raise_dispute))
            .route("/my-disputes", web::get().to(disputes::my_disputes))
            .route("/{id}", web::get().to(disputes::get_dispute))
            .route("/{id}/status", web::put().to(disputes::update_dispute_status)),
    );

    // ── Alerts ──
    cfg.service(
        web::scope("/alerts")
            .route("", web::get().to(alerts::list_alerts))
            .route("", web::post().to(alerts::create_alert)),
    );

    // ── Crop recommendation ──
    cfg.route("/crop-prediction", web::post().to(ml::predict_crop));
}
