use super::{
    ActiveEventLoop, App, ApplicationHandler, Arc, EguiIntegration, FutureExt, LogicalSize,
    PosescopeError, RenderEngine, Window, WindowEvent, WindowId,
};

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let options = self.viewer.options();
        let [width, height] = options.window_size;
        let window_attributes = Window::default_attributes()
            .with_title(options.window_title.clone())
            .with_inner_size(LogicalSize::new(width, height));
        let dark_mode = options.dark_mode;

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                self.fail(PosescopeError::EventLoop(format!("failed to create window: {e}")));
                event_loop.exit();
                return;
            }
        };

        let engine = match RenderEngine::new_windowed(window.clone()).block_on() {
            Ok(engine) => engine,
            Err(e) => {
                self.fail(PosescopeError::Render(e.to_string()));
                event_loop.exit();
                return;
            }
        };

        let egui = EguiIntegration::new(&engine.device, engine.format(), &window, dark_mode);

        window.request_redraw();
        self.window = Some(window);
        self.engine = Some(engine);
        self.egui = Some(egui);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // Let egui see everything first; the canvas reads pointer and keys from it
        let repaint = if let (Some(egui), Some(window)) = (&mut self.egui, &self.window) {
            egui.handle_event(window, &event).repaint
        } else {
            false
        };

        match event {
            WindowEvent::CloseRequested => {
                self.close_requested = true;
            }
            WindowEvent::Resized(size) => {
                if let Some(engine) = &mut self.engine {
                    engine.resize(size.width, size.height);
                }
                self.request_redraw();
            }
            WindowEvent::RedrawRequested => {
                self.render();
            }
            _ => {
                if repaint {
                    self.request_redraw();
                }
            }
        }

        if self.close_requested {
            event_loop.exit();
        }
    }
}
