pub mod reformulate_request;
pub mod reformulate_route;
