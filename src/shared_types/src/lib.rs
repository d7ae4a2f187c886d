//! TypeScript types for the otgw-ui core are generated by `build.rs`.
