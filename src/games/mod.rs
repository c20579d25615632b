pub mod hand_cricket;
