//! Unit tests mirroring the layout of `src/`
