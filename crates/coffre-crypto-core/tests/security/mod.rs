mod entropy_quality;
mod generator_uniformity;
mod no_secret_formatting;
