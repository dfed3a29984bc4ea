pub mod adapter;
pub mod impl_fake;
pub mod impl_tract_onnx;
pub mod interface;
pub mod manifest;
pub mod model_uri;

#[cfg(test)]
mod tests;
