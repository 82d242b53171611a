#[actix_web::get("/databases")]
pub async fn handle_databases(
    state: actix_web::web::Data<crate::model::AppState>,
    query: actix_web::web::Query<crate::model::DatabaseQuery>,
) -> actix_web::HttpResponse {
    let databases: Vec<&crate::model::BlastDatabase> =
        state.catalog.databases_of_kind(query.kind).collect();

    actix_web::HttpResponse::Ok()
        .insert_header((
            actix_web::http::header::CACHE_CONTROL,
            crate::lib::HEADER_VALUE_NO_CACHE.clone(),
        ))
        .json(databases)
}
