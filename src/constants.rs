pub const API_NAME: &str = "[cars-api-rust]";

/// Attribute holding the record key in the backing table.
pub const KEY_ATTRIBUTE: &str = "id";

/// Business fields every create/update body must carry, in reporting order.
pub const REQUIRED_FIELDS: [&str; 4] = ["nombre", "tipo", "potencia", "capacidad"];

pub const ALLOWED_METHODS: &str = "OPTIONS,POST,GET,PUT,DELETE";

pub const MSG_CREATED: &str = "Registro exitoso";
pub const MSG_EMPTY_COLLECTION: &str = "No hay carros registrados aun.";
pub const MSG_UPDATED: &str = "Carro actualizado correctamente";
pub const MSG_DELETED: &str = "Carro eliminado exitosamente";
