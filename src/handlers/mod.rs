pub mod applications;
pub mod auth;
pub mod bookings;
pub mod community;
pub mod gigs;
pub mod offers;
pub mod reviews;
pub mod threads;
pub mod users;
pub mod verification;

use actix_web::web;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    // ── Auth routes (register/login are public; the rest need a session) ──
    cfg.service(
        web::scope("/auth")
            .route("/register", web::post().to(auth::register))
            .route("/login", web::post().to(auth::login))
            .route("/logout", web::post().to(auth::logout))
            .route("/me", web::get().to(auth::me)),
    );

    // ── User routes ──
    cfg.service(web::resource("/users").route(web::get().to(users::get_users)));
    cfg.service(
        web::resource("/users/{id}")
            .route(web::get().to(users::get_user))
            .route(web::put().to(users::update_user))
            .route(web::delete().to(users::delete_user)),
    );

    // ── Gig routes ──
    cfg.service(
        web::scope("/gigs")
            .route("", web::get().to(gigs::get_gigs))
            .route("", web::post().to(gigs::create_gig))
            .route("/{id}", web::get().to(gigs::get_gig))
            .route("/{id}", web::put().to(gigs::update_gig))
            .route("/{id}", web::delete().to(gigs::delete_gig))
            .route("/{id}/publish", web::post().to(gigs::publish_gig))
            .route("/{id}/unpublish", web::post().to(gigs::unpublish_gig))
            .route("/user/{user_id}", web::get().to(gigs::get_gigs_by_user_id)),
    );

    // ── Application routes ──
    cfg.service(
        web::scope("/applications")
            .route("", web::get().to(applications::get_applications))
            .route("", web::post().to(applications::create_application))
            .route("/{id}", web::delete().to(applications::delete_application))
            .route("/{id}/status", web::put().to(applications::update_status))
            .route(
                "/gig/{gig_id}",
                web::get().to(applications::get_applications_by_gig),
            ),
    );

    // ── Thread and message routes ──
    cfg.service(
        web::scope("/threads")
            .route("", web::get().to(threads::get_threads))
            .route("", web::post().to(threads::create_thread))
            .route("/{id}", web::get().to(threads::get_thread))
            .route("/{id}/messages", web::get().to(threads::get_messages))
            .route("/{id}/messages", web::post().to(threads::post_message)),
    );

    // ── Offer routes ──
    cfg.service(
        web::scope("/offers")
            .route("", web::post().to(offers::create_offer))
            .route("/{id}", web::get().to(offers::get_offer))
            .route("/{id}", web::patch().to(offers::patch_offer))
            .route("/{id}/accept", web::post().to(offers::accept_offer))
            .route("/{id}/decline", web::post().to(offers::decline_offer))
            .route("/{id}/withdraw", web::post().to(offers::withdraw_offer)),
    );

    // ── Booking routes ──
    cfg.service(
        web::scope("/bookings")
            .route("", web::get().to(bookings::get_bookings))
            .route("", web::post().to(bookings::create_booking))
            .route("/{id}", web::get().to(bookings::get_booking))
            .route("/{id}", web::patch().to(bookings::update_booking))
            .route("/{id}/pay", web::post().to(bookings::pay_booking)),
    );

    // ── Review routes ──
    cfg.service(
        web::resource("/reviews")
            .route(web::get().to(reviews::get_reviews))
            .route(web::post().to(reviews::create_review)),
    );

    // ── Verification routes ──
    cfg.service(
        web::scope("/verification")
            .route("", web::post().to(verification::create_request))
            .route("/mine", web::get().to(verification::get_my_requests))
            .route("/pending", web::get().to(verification::get_pending_requests))
            .route("/{id}/approve", web::post().to(verification::approve_request))
            .route("/{id}/reject", web::post().to(verification::reject_request)),
    );

    // ── Community board routes ──
    cfg.service(
        web::scope("/posts")
            .route("", web::get().to(community::get_posts))
            .route("", web::post().to(community::create_post))
            .route("/{id}", web::get().to(community::get_post))
            .route("/{id}", web::delete().to(community::delete_post))
            .route("/{id}/vote", web::post().to(community::vote_post)),
    );
}
