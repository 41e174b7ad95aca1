use super::LookupError;
use crate::page::{Dropdown, DropdownOption, NavBar, NavButton, NavControl, OptionValue, Page, SectionView};

fn page() -> Page {
    let section = |id: &str, title: &str| SectionView::new(id.to_string(), title.to_string(), vec![]);
    let button = |label: &str, target: &str| {
        NavControl::Button(NavButton {
            label: label.to_string(),
            target: target.to_string(),
            active: false,
        })
    };

    Page {
        title: "Guide".to_string(),
        sections: vec![
            section("section-overview", "Overview"),
            section("section-related-docs", "Related Docs"),
            section("section-usage", "Usage"),
        ],
        nav: NavBar {
            controls: vec![
                button("Overview", "overview"),
                NavControl::Dropdown(Dropdown::new(
                    "Related Docs".to_string(),
                    vec![DropdownOption {
                        label: "Alpha".to_string(),
                        value: OptionValue::SubPanel(0),
                    }],
                )),
                button("Usage", "usage"),
            ],
        },
        scroll_offset: 0,
    }
}

#[test]
fn test_region_index() {
    let page = page();

    assert_eq!(page.region_index("section-", "usage"), Ok(2));
    assert_eq!(
        page.region_index("panel-", "usage"),
        Err(LookupError::Region("panel-usage".to_string()))
    );
}

#[test]
fn test_section_by_title_is_exact() {
    let page = page();

    assert_eq!(page.section_by_title("Related Docs"), Ok(1));
    assert!(page.section_by_title("related docs").is_err());
}

#[test]
fn test_button_target_rejects_dropdown() {
    let page = page();

    assert_eq!(page.button_target(0), Ok("overview"));
    assert_eq!(page.button_target(1), Err(LookupError::Button(1)));
    assert_eq!(page.button_target(9), Err(LookupError::Button(9)));
}

#[test]
fn test_button_indices_skip_dropdown() {
    let page = page();

    assert_eq!(page.button_indices(), vec![0, 2]);
    assert_eq!(page.dropdown_index(), Ok(1));
    assert_eq!(page.button_for("usage"), Ok(2));
    assert!(page.button_for("related-docs").is_err());
}

#[test]
fn test_missing_dropdown() {
    let mut page = page();
    page.nav.controls.remove(1);

    assert_eq!(page.dropdown_index(), Err(LookupError::Dropdown));
}

#[test]
fn test_error_messages_name_the_missing_element() {
    assert_eq!(
        LookupError::Region("panel-x".to_string()).to_string(),
        "no region with id 'panel-x'"
    );
    assert_eq!(
        LookupError::DropdownOption(3).to_string(),
        "dropdown has no option 3"
    );
}
