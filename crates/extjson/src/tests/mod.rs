mod arbitrary;
mod values;
