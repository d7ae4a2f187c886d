use anyhow::Result;
use crux_core::typegen::TypeGen;
use otgw_ui_core::{
    events::{InfoEvent, InventoryEvent, SocketEvent, UiEvent, UpgradeEvent},
    types::{ConnectionState, TargetKind, UpgradePhase},
    App,
};
use std::path::PathBuf;

fn main() -> Result<()> {
    println!("cargo:rerun-if-changed=../app");

    let mut gen = TypeGen::new();

    gen.register_app::<App>()?;

    // Explicitly register domain event enums to ensure all variants are traced
    gen.register_type::<InventoryEvent>()?;
    gen.register_type::<InfoEvent>()?;
    gen.register_type::<UpgradeEvent>()?;
    gen.register_type::<SocketEvent>()?;
    gen.register_type::<UiEvent>()?;

    // Explicitly register other enums to ensure all variants are traced
    gen.register_type::<ConnectionState>()?;
    gen.register_type::<TargetKind>()?;
    gen.register_type::<UpgradePhase>()?;

    let output_root = PathBuf::from("./generated");

    gen.typescript("shared_types", output_root.join("typescript"))?;

    Ok(())
}
