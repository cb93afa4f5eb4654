//! Schema migrations and seed data.

use sqlx::migrate::Migrator;

use medtrain_core::ALL_CATEGORY_NAME;

/// Versioned schema migrations, embedded at compile time.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// A seeded category: English, Swahili, Korean, description.
pub type SeedCategory = (&'static str, &'static str, &'static str, &'static str);

/// Categories inserted on open, in id order.
///
/// "All" comes first so that a fresh database assigns it
/// [`medtrain_core::ALL_CATEGORY_ID`].
pub const DEFAULT_CATEGORIES: [SeedCategory; 8] = [
    (ALL_CATEGORY_NAME, "Yote", "모두", "All medical devices"),
    (
        "Suction Pumps",
        "Pampu za Kunyonya",
        "석션 펌프",
        "Suction pump devices",
    ),
    ("Lighting", "Taa", "조명", "Medical lighting equipment"),
    (
        "Surgery Equipment",
        "Vifaa vya Upasuaji",
        "수술 장비",
        "Surgical equipment and tools",
    ),
    (
        "Diagnostic Equipment",
        "Vifaa vya Uchunguzi",
        "진단 장비",
        "Diagnostic devices",
    ),
    (
        "Patient Monitoring",
        "Ufuatiliaji wa Wagonjwa",
        "환자 모니터링",
        "Patient monitoring systems",
    ),
    ("Sterilization", "Usafi", "멸균", "Sterilization equipment"),
    (
        "Laboratory Equipment",
        "Vifaa vya Maabara",
        "실험실 장비",
        "Laboratory devices",
    ),
];
