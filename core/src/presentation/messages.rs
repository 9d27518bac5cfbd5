//! User-facing strings, selected by the device language.

use crate::types::AppLanguage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Messages {
    pub invalid_quantity: &'static str,
    pub above_maximum: &'static str,
    pub exceeds_available: &'static str,
    pub exceeds_items: &'static str,
    pub blank_description: &'static str,
    pub too_few_values: &'static str,
    pub no_items_left: &'static str,
    pub generic_error: &'static str,
}

const ENGLISH: Messages = Messages {
    invalid_quantity: "Please enter a valid quantity",
    above_maximum: "This quantity is above the allowed maximum",
    exceeds_available: "Cannot raffle more numbers than are available",
    exceeds_items: "There are not enough items for this quantity",
    blank_description: "Please enter a description",
    too_few_values: "Please enter at least two options",
    no_items_left: "Every item has already been raffled",
    generic_error: "Something went wrong. Please try again",
};

const PORTUGUESE: Messages = Messages {
    invalid_quantity: "Por favor, informe uma quantidade válida",
    above_maximum: "Esta quantidade está acima do máximo permitido",
    exceeds_available: "Não é possível sortear mais números do que os disponíveis",
    exceeds_items: "Não há itens suficientes para esta quantidade",
    blank_description: "Por favor, informe uma descrição",
    too_few_values: "Por favor, informe pelo menos duas opções",
    no_items_left: "Todos os itens já foram sorteados",
    generic_error: "Algo deu errado. Por favor, tente novamente",
};

const SPANISH: Messages = Messages {
    invalid_quantity: "Por favor, introduce una cantidad válida",
    above_maximum: "Esta cantidad supera el máximo permitido",
    exceeds_available: "No se pueden sortear más números de los disponibles",
    exceeds_items: "No hay suficientes elementos para esta cantidad",
    blank_description: "Por favor, introduce una descripción",
    too_few_values: "Por favor, introduce al menos dos opciones",
    no_items_left: "Todos los elementos ya fueron sorteados",
    generic_error: "Algo salió mal. Por favor, inténtalo de nuevo",
};

impl Messages {
    pub fn for_language(language: AppLanguage) -> Self {
        match language {
            AppLanguage::English    => ENGLISH,
            AppLanguage::Portuguese => PORTUGUESE,
            AppLanguage::Spanish    => SPANISH,
        }
    }
}

impl Default for Messages {
    fn default() -> Self {
        ENGLISH
    }
}
