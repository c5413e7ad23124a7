use view_controller::{
    types::{preset_cities, City},
    ControllerState, ViewError, ViewState, ViewStateStore,
};

/// Side menu controlling the map: the "is bounded" checkbox, the country code
/// field and the city shortcuts.
///
/// The code field is only written to the store when the edit is committed
/// (Enter or focus loss). A rejected code reverts the field to the last valid
/// value and shows the error below it.
pub struct WidgetMenu {
    code_input: String,
    error_message: Option<String>,
    cities: Vec<City>,
}

impl WidgetMenu {
    pub fn new(store: &ViewStateStore) -> Self {
        Self {
            code_input: store.state().country_code.clone(),
            error_message: None,
            cities: preset_cities(),
        }
    }

    /// Writes the field's content to the store.
    pub fn commit_code(&mut self, store: &mut ViewStateStore) -> Result<(), ViewError> {
        let result = store.set_country_code(&self.code_input);
        self.error_message = result.as_ref().err().map(|e| e.to_string());
        self.code_input = store.state().country_code.clone();
        result
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Shows the menu. Returns the city the user asked to focus on, if any.
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        store: &mut ViewStateStore,
        status: &ControllerState,
    ) -> Option<City> {
        let mut chosen = None;

        ui.heading("Map");
        ui.add_space(10.0);

        let mut is_bounded = store.state().is_bounded;
        if ui.checkbox(&mut is_bounded, "is bounded").changed() {
            store.set_bounded(is_bounded);
        }

        ui.horizontal(|ui| {
            ui.label("country");
            let response = ui.add(
                egui::TextEdit::singleline(&mut self.code_input)
                    .char_limit(8)
                    .desired_width(40.0),
            );
            if response.lost_focus() {
                let _ = self.commit_code(store);
            }
        });

        if let Some(message) = &self.error_message {
            ui.colored_label(egui::Color32::LIGHT_RED, message.as_str());
        }

        ui.add_space(10.0);
        ui.label(egui::RichText::new(status_text(store.state(), status)).italics());

        ui.separator();
        ui.label(egui::RichText::new("Choose a city").strong());
        for city in &self.cities {
            if ui.button(city.name.as_str()).clicked() {
                chosen = Some(city.clone());
            }
        }

        chosen
    }
}

/// One line describing what the controller currently does with the map.
pub fn status_text(state: &ViewState, status: &ControllerState) -> String {
    match status {
        ControllerState::Bounded(extent) => {
            format!("Bounded to {} ({})", extent.name, extent.country_code)
        }
        ControllerState::Unbounded if state.is_bounded => format!(
            "No extent for {}, the map is not bounded",
            state.country_code
        ),
        ControllerState::Unbounded => "Unbounded".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use view_controller::ExtentTable;

    #[test]
    fn test_commit_normalizes_the_field() {
        let mut store = ViewStateStore::new();
        let mut menu = WidgetMenu::new(&store);

        menu.code_input = " de".to_string();
        assert!(menu.commit_code(&mut store).is_ok());
        assert_eq!(store.state().country_code, "DE");
        assert_eq!(menu.code_input, "DE");
        assert_eq!(menu.error_message(), None);
    }

    #[test]
    fn test_rejected_code_reverts_the_field() {
        let mut store = ViewStateStore::new();
        let mut menu = WidgetMenu::new(&store);

        menu.code_input = "P".to_string();
        assert!(menu.commit_code(&mut store).is_err());
        assert_eq!(store.state().country_code, "PL");
        assert_eq!(menu.code_input, "PL", "Field should show the last valid code");
        assert!(menu.error_message().is_some());

        menu.code_input = "cz".to_string();
        assert!(menu.commit_code(&mut store).is_ok());
        assert_eq!(menu.error_message(), None, "A valid edit clears the error");
    }

    #[test]
    fn test_status_text() {
        let table = ExtentTable::bundled().unwrap();
        let poland = table.resolve_extent("PL").unwrap().clone();
        let bounded_zz = ViewState {
            is_bounded: true,
            country_code: "ZZ".to_string(),
        };

        assert_eq!(
            status_text(&ViewState::default(), &ControllerState::Bounded(poland)),
            "Bounded to Poland (PL)"
        );
        assert_eq!(
            status_text(&bounded_zz, &ControllerState::Unbounded),
            "No extent for ZZ, the map is not bounded"
        );
        assert_eq!(
            status_text(&ViewState::default(), &ControllerState::Unbounded),
            "Unbounded"
        );
    }

    #[test]
    fn test_menu_lists_preset_cities() {
        let menu = WidgetMenu::new(&ViewStateStore::new());
        assert!(menu.cities.iter().any(|city| city.name == "Gdynia"));
    }
}
