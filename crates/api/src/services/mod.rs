pub mod access_gate;
