pub mod measurement_frame;
