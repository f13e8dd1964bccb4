//! Built-in catalog: Windows UEFI boot, from power-on to the login screen.

use super::StageCatalog;
use crate::core::{
    ArtifactTransfer, Controller, LibraryEntry, LocationKind, LocationMeta, OriginKind,
    SourceLocation, Stage,
};

fn esp(hint: &str) -> LocationMeta {
    LocationMeta::new(LocationKind::Esp, "ESP", hint)
}

fn win(hint: &str) -> LocationMeta {
    LocationMeta::new(LocationKind::Windows, "Windows partition", hint)
}

fn ram(hint: &str) -> LocationMeta {
    LocationMeta::new(LocationKind::Resident, "RAM", hint)
}

fn stages() -> Vec<Stage> {
    vec![
        Stage::new("Power On")
            .with_icon("⚡")
            .with_subtitle("Hardware wakes up")
            .with_layer("Hardware")
            .with_controller(Controller::new("⚡", "Hardware/CPU reset"))
            .with_security(false, false)
            .with_source(SourceLocation::None)
            .with_explanation(
                "You press the power button. Electricity flows. The CPU resets and starts from its first instruction.",
            ),
        Stage::new("UEFI firmware")
            .with_icon("🧠")
            .with_subtitle("Checks + finds boot entry")
            .with_layer("Firmware")
            .with_controller(Controller::new("🧠", "UEFI firmware"))
            .with_security(true, true)
            .with_source(SourceLocation::Esp)
            .with_explanation(
                "UEFI runs from the motherboard firmware chip. It checks devices and chooses a boot option from the UEFI boot list.",
            )
            .with_artifact(
                ArtifactTransfer::new(
                    "UEFI boot entry",
                    OriginKind::Firmware,
                    "UEFI reads saved boot options (NVRAM).",
                )
                .with_location(LocationMeta::new(
                    LocationKind::Firmware,
                    "UEFI (firmware)",
                    "Stored in motherboard firmware + boot list",
                )),
            )
            .with_artifact(
                ArtifactTransfer::new(
                    "ESP located",
                    OriginKind::Esp,
                    "UEFI finds the EFI System Partition (ESP).",
                )
                .with_location(esp("Small EFI System Partition on the disk")),
            ),
        Stage::new("Windows Boot Manager")
            .with_icon("🚀")
            .with_subtitle("Loads from ESP")
            .with_layer("Boot Loader")
            .with_controller(Controller::new("🚀", "bootmgfw.efi (Boot Manager)"))
            .with_security(true, true)
            .with_source(SourceLocation::Esp)
            .with_explanation(
                "UEFI loads Windows Boot Manager from the EFI System Partition and runs it. This is the key handover step.",
            )
            .with_artifact(
                ArtifactTransfer::new(
                    "\\EFI\\Microsoft\\Boot\\bootmgfw.efi",
                    OriginKind::Esp,
                    "Windows Boot Manager file loaded and executed.",
                )
                .with_location(esp("UEFI loads this EFI file from ESP")),
            ),
        Stage::new("Boot Configuration (BCD)")
            .with_icon("📋")
            .with_subtitle("Reads startup choices")
            .with_layer("Boot Loader")
            .with_controller(Controller::new("📋", "Boot Manager reading BCD"))
            .with_security(true, true)
            .with_source(SourceLocation::Esp)
            .with_explanation(
                "Boot Manager reads the BCD settings. It decides which Windows installation to boot and which options to use.",
            )
            .with_artifact(
                ArtifactTransfer::new(
                    "BCD store",
                    OriginKind::Esp,
                    "Boot settings database (OS entry, recovery, options).",
                )
                .with_location(esp("Boot configuration database stored on disk")),
            ),
        Stage::new("Windows OS Loader")
            .with_icon("📦")
            .with_subtitle("Loads kernel pieces")
            .with_layer("Boot Loader")
            .with_controller(Controller::new("📦", "winload.efi (OS Loader)"))
            .with_security(true, true)
            .with_source(SourceLocation::Windows)
            .with_explanation(
                "Boot Manager starts the OS Loader, which loads the kernel and essential boot drivers into memory.",
            )
            .with_artifact(
                ArtifactTransfer::new(
                    "winload.efi",
                    OriginKind::Windows,
                    "Windows OS Loader runs (UEFI mode).",
                )
                .with_location(win("Stored with Windows system files")),
            )
            .with_artifact(
                ArtifactTransfer::new(
                    "ntoskrnl.exe",
                    OriginKind::Windows,
                    "Windows kernel image (core).",
                )
                .with_location(win("Kernel file stored on Windows disk partition")),
            )
            .with_artifact(
                ArtifactTransfer::new(
                    "HAL",
                    OriginKind::Windows,
                    "Hardware Abstraction Layer (helps kernel talk to hardware).",
                )
                .with_location(win("System component stored with Windows files")),
            )
            .with_artifact(
                ArtifactTransfer::new(
                    "Boot-start drivers",
                    OriginKind::Windows,
                    "Critical drivers for storage and early boot.",
                )
                .with_location(win("Essential drivers stored with system files")),
            ),
        // Focus stays on the Windows partition while the kernel itself is
        // already resident.
        Stage::new("Kernel starts")
            .with_icon("⚙️")
            .with_subtitle("CPU + memory control")
            .with_layer("Kernel")
            .with_controller(Controller::new("⚙️", "Windows kernel (ntoskrnl.exe)"))
            .with_security(false, true)
            .with_source(SourceLocation::Windows)
            .with_explanation(
                "The kernel takes control. It sets up scheduling, memory protection, and continues initializing drivers.",
            )
            .with_artifact(
                ArtifactTransfer::new(
                    "Kernel running",
                    OriginKind::Resident,
                    "Kernel begins executing from RAM.",
                )
                .with_location(ram("Now running from memory (not disk)")),
            )
            .with_artifact(
                ArtifactTransfer::new(
                    "Driver init",
                    OriginKind::Resident,
                    "Drivers start and hardware becomes usable.",
                )
                .with_location(ram("Driver code is executing from memory")),
            ),
        Stage::new("System services")
            .with_icon("🧑‍🔧")
            .with_subtitle("OS becomes usable")
            .with_layer("Operating System")
            .with_controller(Controller::new("🧑‍🔧", "Windows services + system processes"))
            .with_security(false, true)
            .with_source(SourceLocation::Windows)
            .with_explanation(
                "Windows starts core system processes and services. Networking, security, and background components come online.",
            )
            .with_artifact(
                ArtifactTransfer::new(
                    "System services",
                    OriginKind::Windows,
                    "Background services start (high-level).",
                )
                .with_location(win("Service binaries loaded from disk to RAM")),
            )
            .with_artifact(
                ArtifactTransfer::new(
                    "More drivers",
                    OriginKind::Windows,
                    "Additional drivers load for devices.",
                )
                .with_location(win("Drivers are loaded from disk to RAM as needed")),
            ),
        Stage::new("Login screen")
            .with_icon("😊")
            .with_subtitle("You can use Windows")
            .with_layer("User")
            .with_controller(Controller::new("😊", "User session (login/UI)"))
            .with_security(false, true)
            .with_source(SourceLocation::Windows)
            .with_explanation(
                "You see the login screen. After login, your desktop session and apps start.",
            )
            .with_artifact(
                ArtifactTransfer::new(
                    "User session",
                    OriginKind::Windows,
                    "User profile and UI components load after login.",
                )
                .with_location(win("UI/user components load from disk into RAM")),
            ),
    ]
}

fn library() -> Vec<LibraryEntry> {
    vec![
        LibraryEntry::new(
            "ESP: \\EFI\\Microsoft\\Boot\\bootmgfw.efi",
            SourceLocation::Esp,
            "Windows Boot Manager (UEFI boot file). It is loaded by UEFI.",
        )
        .with_location(esp("UEFI loads this file from ESP")),
        LibraryEntry::new(
            "ESP: BCD store",
            SourceLocation::Esp,
            "Boot Configuration Data. It tells Windows which OS to boot and what options to use.",
        )
        .with_location(esp("Boot database stored on ESP")),
        LibraryEntry::new(
            "Windows: winload.efi",
            SourceLocation::Windows,
            "Windows OS Loader. It loads the kernel and early drivers into RAM.",
        )
        .with_location(win("Stored in Windows system files")),
        LibraryEntry::new(
            "Windows: ntoskrnl.exe",
            SourceLocation::Windows,
            "Windows kernel image. This is the core that controls CPU, memory, and devices.",
        )
        .with_location(win("Kernel stored on Windows partition")),
        LibraryEntry::new(
            "Windows: HAL",
            SourceLocation::Windows,
            "Hardware Abstraction Layer. Helps Windows kernel work with different hardware.",
        )
        .with_location(win("System component stored with Windows files")),
        LibraryEntry::new(
            "Windows: Boot-start drivers",
            SourceLocation::Windows,
            "Critical drivers needed early (especially storage/disk access).",
        )
        .with_location(win("Driver files stored with Windows system files")),
        LibraryEntry::new(
            "Windows: System services",
            SourceLocation::Windows,
            "Background services (networking, security, logging, and more).",
        )
        .with_location(win("Service binaries stored on disk")),
    ]
}

/// Returns the eight-stage Windows boot catalog with its disk library.
#[must_use]
pub fn windows_boot() -> StageCatalog {
    let mut stages = stages();
    for (position, stage) in stages.iter_mut().enumerate() {
        stage.index = position;
    }
    StageCatalog {
        stages,
        library: library(),
    }
}
