pub mod car_service;


pub use car_service::CarService;
