pub mod genesis_g70;
pub mod hyundai_sonata;
pub mod kia_niro_ev;
