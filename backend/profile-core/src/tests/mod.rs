mod support;
mod surface;
