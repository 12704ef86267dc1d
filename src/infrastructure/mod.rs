pub mod http;
pub mod mock_data;
pub mod rendering;
pub mod services;
