pub mod nature_vision;
