#![allow(dead_code)]

pub use routeros_mock::{MockRouterOs, MOCK_PASSWORD, MOCK_USER};
