mod bindings;
mod support;
mod validation;
