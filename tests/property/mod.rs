mod identify_determinism;
mod mode_roundtrip;
