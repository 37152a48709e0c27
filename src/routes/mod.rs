use actix_web::web;

pub mod backend_health;
pub mod jogadores;
pub mod peladas;
pub mod partidas;
pub mod gols;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(backend_health::root)
        .service(backend_health::backend_health);

    cfg.service(
        web::scope("/api")
            .service(jogadores::create_player)
            .service(jogadores::list_players)
            .service(jogadores::get_player)
            .service(jogadores::update_player)
            .service(jogadores::delete_player)
            .service(peladas::create_pelada)
            .service(peladas::list_peladas)
            .service(peladas::get_pelada)
            .service(peladas::update_pelada)
            .service(peladas::delete_pelada)
            .service(peladas::enroll_player)
            .service(peladas::list_participants)
            .service(peladas::confirm_presence)
            .service(peladas::assign_team)
            .service(peladas::remove_participant)
            .service(partidas::create_match)
            .service(partidas::list_matches)
            .service(partidas::get_match)
            .service(partidas::update_match)
            .service(partidas::delete_match)
            .service(partidas::start_match)
            .service(partidas::finish_match)
            .service(partidas::get_match_detail)
            .service(partidas::clock_action)
            .service(partidas::quick_goal)
            .service(gols::create_goal)
            .service(gols::list_goals)
            .service(gols::get_goal)
            .service(gols::update_goal)
            .service(gols::delete_goal)
    );
}
