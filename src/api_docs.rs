use crate::api;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::health::health_check,
        api::books::list_books,
        api::books::create_book,
        api::books::list_genres,
        api::books::get_book,
        api::books::update_book,
        api::books::delete_book,
        api::members::list_members,
        api::members::create_member,
        api::members::get_member,
        api::members::update_member,
        api::members::delete_member,
        api::members::member_loans,
        api::members::member_requests,
        api::members::member_summary,
        api::loans::list_loans,
        api::loans::create_loan,
        api::loans::get_loan,
        api::loans::return_loan,
        api::loans::collect_fine,
        api::requests::list_requests,
        api::requests::create_request,
        api::requests::decide_request,
        api::library::get_info,
        api::library::update_info,
        api::reports::get_stats,
        api::reports::export_report,
    ),
    tags(
        (name = "lending-desk", description = "Lending desk API")
    )
)]
pub struct ApiDoc;
