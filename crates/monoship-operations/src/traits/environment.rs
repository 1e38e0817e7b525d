pub trait EnvironmentProvider: Send + Sync {
    fn var(&self, key: &str) -> Option<String>;
}

impl<T: EnvironmentProvider + ?Sized> EnvironmentProvider for &T {
    fn var(&self, key: &str) -> Option<String> {
        (**self).var(key)
    }
}
