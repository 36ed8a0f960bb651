use cytostage_parts::{StageConfig, epi_layout};

#[test]
fn epi_layout_is_deterministic() {
    let cfg = StageConfig::default();
    let first = epi_layout(&cfg).unwrap();
    let second = epi_layout(&cfg).unwrap();

    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(second.iter()) {
        assert_eq!(a.name, b.name);
        assert_eq!(a.category, b.category);
        assert_eq!(a.placement, b.placement);
        assert_eq!(a.parameters, b.parameters);
    }
    assert_eq!(first.bom(), second.bom());
}
